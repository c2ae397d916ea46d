use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use trials_cli::types::{BuildResult, FileSummary};

pub fn print_summary(result: &BuildResult) {
    println!("Input: {}", result.input_dir.display());
    println!("Output: {}", result.output_dir.display());
    println!("Index: {}", result.index_path.display());
    println!("Facets: {}", result.facets_path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Format"),
        header_cell("Indexed"),
        header_cell("Dropped"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_indexed = 0usize;
    let mut total_dropped = 0usize;
    let mut total_errors = 0usize;
    for file in &result.files {
        total_indexed += file.indexed;
        total_dropped += file.dropped;
        total_errors += file.record_errors;
        table.add_row(vec![
            file_cell(file),
            format_cell(file),
            Cell::new(file.indexed),
            count_cell(file.dropped, Color::Yellow),
            count_cell(file.record_errors, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_indexed).add_attribute(Attribute::Bold),
        count_cell(total_dropped, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total_errors, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Index entries: {} | Facet keys: {}",
        result.entry_count, result.facet_count
    );

    if !result.errors.is_empty() {
        eprintln!("Recovered errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn file_cell(file: &FileSummary) -> Cell {
    let name = file
        .path
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("?");
    Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn format_cell(file: &FileSummary) -> Cell {
    match file.format {
        Some(format) => Cell::new(format.label()),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
