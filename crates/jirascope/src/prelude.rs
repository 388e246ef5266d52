pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::Result;

/// Build a borderless result table with the given header row as its title.
pub fn new_table(header: prettytable::Row) -> prettytable::Table {
    let mut table = prettytable::Table::new();

    let format = prettytable::format::FormatBuilder::new()
        .padding(1, 1)
        .build();

    table.set_format(format);
    table.set_titles(header);

    table
}
