use crate::reports;
use cipherforge::error::CfResult;

pub fn run() -> CfResult<()> {
    reports::print_presets();
    Ok(())
}
