use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use comic_model::Comic;
use comic_store::FrameAsset;
use comic_viewer::{FavoriteState, ModePolicy};

use crate::commands::ViewReport;

pub fn print_comics(comics: &[Comic]) {
    if comics.is_empty() {
        println!("No comics found.");
        return;
    }
    println!("{}", comics_table(comics));
}

pub fn comics_table(comics: &[Comic]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Frames"),
        header_cell("Tags"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for comic in comics {
        table.add_row(vec![
            Cell::new(comic.id()),
            Cell::new(comic.title()),
            Cell::new(comic.frame_count()),
            tags_cell(comic.tags()),
            dim_cell(comic.created_at().format("%Y-%m-%d")),
        ]);
    }
    table
}

pub fn print_comic(comic: &Comic) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("ID"), Cell::new(comic.id())]);
    table.add_row(vec![header_cell("Title"), Cell::new(comic.title())]);
    table.add_row(vec![header_cell("Creator"), Cell::new(comic.creator_id())]);
    table.add_row(vec![header_cell("Frames"), Cell::new(comic.frame_count())]);
    table.add_row(vec![header_cell("Tags"), tags_cell(comic.tags())]);
    table.add_row(vec![
        header_cell("Image"),
        if comic.image_url().is_empty() {
            dim_cell("-")
        } else {
            Cell::new(comic.image_url())
        },
    ]);
    table.add_row(vec![
        header_cell("Created"),
        Cell::new(comic.created_at().format("%Y-%m-%d %H:%M UTC")),
    ]);
    println!("{table}");
}

pub fn print_view(report: &ViewReport) {
    println!("{table}", table = view_table(report));
    for note in &report.notes {
        println!("note: {note}");
    }
}

pub fn view_table(report: &ViewReport) -> Table {
    let snapshot = &report.snapshot;
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Comic"), Cell::new(&snapshot.title)]);
    table.add_row(vec![header_cell("Mode"), Cell::new(&snapshot.mode_label)]);
    table.add_row(vec![header_cell("Frame"), Cell::new(snapshot.position)]);
    table.add_row(vec![header_cell("Playing"), flag_cell(snapshot.playing)]);
    table.add_row(vec![
        header_cell("Favorite"),
        favorite_cell(snapshot.favorite, snapshot.signed_in, report.favorite_toggled),
    ]);
    table.add_row(vec![header_cell("Image"), asset_cell(&report.asset)]);
    table
}

pub fn print_modes(policies: &[ModePolicy]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Mode"),
        header_cell("ID"),
        header_cell("Legacy ID"),
        header_cell("Manual"),
        header_cell("Auto-advance"),
        header_cell("Wrap"),
    ]);
    apply_table_style(&mut table);
    for column in 3..6 {
        align_column(&mut table, column, CellAlignment::Center);
    }
    for policy in policies {
        table.add_row(vec![
            Cell::new(policy.label()),
            Cell::new(policy.mode.id()),
            dim_cell(policy.mode.legacy_id()),
            flag_cell(policy.allows_manual_navigation),
            flag_cell(policy.auto_advance_enabled),
            flag_cell(policy.wrap_on_advance),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn tags_cell(tags: &[String]) -> Cell {
    if tags.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(tags.join(", "))
    }
}

fn favorite_cell(state: FavoriteState, signed_in: bool, toggled: bool) -> Cell {
    if !signed_in {
        return dim_cell("sign in to favorite");
    }
    let label = match state {
        FavoriteState::Present => "★ favorited",
        FavoriteState::Absent => "☆ not favorited",
        FavoriteState::Unknown => "? unknown",
    };
    let cell = Cell::new(if toggled {
        format!("{label} (saved)")
    } else {
        label.to_string()
    });
    match state {
        FavoriteState::Present => cell.fg(Color::Yellow).add_attribute(Attribute::Bold),
        FavoriteState::Absent => cell,
        FavoriteState::Unknown => cell.fg(Color::DarkGrey),
    }
}

fn asset_cell(asset: &FrameAsset) -> Cell {
    match asset {
        FrameAsset::Ready { url } => Cell::new(url),
        FrameAsset::Placeholder { reason } => Cell::new(reason.message()).fg(Color::Yellow),
    }
}
