use cipherforge::analysis::VigenereSolution;
use cipherforge::cipher::SquareKey;
use cipherforge::config::Preset;
use cipherforge::core_types::{LaneStats, Ranked, RankedEntry};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strum::IntoEnumIterator;

fn preview(text: &str, width: usize) -> String {
    if text.len() <= width {
        text.to_string()
    } else {
        format!("{}…", text.get(..width).unwrap_or(text))
    }
}

pub fn print_square_grid(name: &str, key: &SquareKey, side: usize) {
    println!("\n{}:", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in key.rows(side) {
        let cells: Vec<Cell> = row
            .iter()
            .map(|&b| Cell::new(b as char).set_alignment(CellAlignment::Center))
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_lane_stats(stats: &LaneStats) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        "Iterations",
        "Evaluated",
        "Accepted",
        "Invalid",
        "Reheats",
        "Restarts",
    ]);
    table.add_row(vec![
        stats.iterations,
        stats.evaluated,
        stats.accepted,
        stats.invalid,
        stats.reheats,
        stats.restarts,
    ]);
    println!("{}", table);
}

pub fn print_ranked_orders(ranked: &Ranked<RankedEntry>, k: usize) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Order").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Square"),
        Cell::new("Plaintext"),
    ]);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (rank, entry) in ranked.top(k).iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.order),
            Cell::new(format!("{:.2}", entry.score)).fg(Color::Cyan),
            Cell::new(&entry.square),
            Cell::new(preview(&entry.plaintext, 40)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_vigenere_solutions(solutions: &[(String, VigenereSolution)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Order").add_attribute(Attribute::Bold),
        Cell::new("Period"),
        Cell::new("IC").fg(Color::Cyan),
        Cell::new("Key").fg(Color::Green),
        Cell::new("Plaintext"),
    ]);

    for (order, s) in solutions {
        table.add_row(vec![
            Cell::new(order),
            Cell::new(s.period),
            Cell::new(format!("{:.4}", s.mean_ic)).fg(Color::Cyan),
            Cell::new(&s.key).fg(Color::Green),
            Cell::new(preview(&s.plaintext, 40)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_presets() {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        "Preset",
        "Iterations",
        "T0",
        "Cooling",
        "Stagnation",
        "Reheat",
        "Restart",
        "Swap/Rev",
        "Letters only",
        "Order rate",
        "Mode",
    ]);

    for preset in Preset::iter() {
        let cfg = preset.config();
        let m = &cfg.mutation;
        table.add_row(vec![
            Cell::new(preset).fg(Color::Cyan),
            Cell::new(cfg.max_iterations),
            Cell::new(cfg.initial_temperature),
            Cell::new(cfg.cooling_rate),
            Cell::new(
                cfg.stagnation_limit
                    .map_or_else(|| "-".to_string(), |l| l.to_string()),
            ),
            Cell::new(cfg.reheat_temperature),
            Cell::new(cfg.restart),
            Cell::new(format!("{}/{}", m.swap_weight, m.reverse_weight)),
            Cell::new(m.letters_only_rate),
            Cell::new(m.order_mutation_rate),
            Cell::new(cfg.mode),
        ]);
    }
    println!("{}", table);
}
