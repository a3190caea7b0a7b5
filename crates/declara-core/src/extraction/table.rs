use std::ops::Range;

use crate::extraction::PageContent;

/// Columns a continuation line may start left of the name cell it extends.
const CONTINUATION_SLACK: usize = 2;

/// Reconstruct table data from pdftotext -layout output.
///
/// pdftotext -layout preserves column alignment using spaces, so a table
/// shows up as a run of consecutive lines that each split into two or
/// more cells on gaps of 2+ spaces. A one-cell line starting inside the
/// previous row's name column is a wrapped name and is appended to that
/// cell after a `\n`. Any other line ends the current table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub page_number: usize,
    pub rows: Vec<Vec<String>>,
}

/// A cell and the character column it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    pub column: usize,
    pub text: &'a str,
}

/// Find the tables on a page.
pub fn find_tables(page: &PageContent) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut name_column: Option<Range<usize>> = None;

    for line in &page.lines {
        let mut cells = split_cells(line);
        if cells.len() >= 2 {
            split_leading_quantity(&mut cells);
            name_column = name_column_of(&cells);
            rows.push(cells.iter().map(|c| c.text.to_string()).collect());
            continue;
        }

        if let ([cell], Some(range), Some(row)) = (cells.as_slice(), &name_column, rows.last_mut()) {
            if range.contains(&cell.column) {
                row[1].push('\n');
                row[1].push_str(cell.text);
                continue;
            }
        }

        name_column = None;
        if !rows.is_empty() {
            tables.push(Table {
                page_number: page.page_number,
                rows: std::mem::take(&mut rows),
            });
        }
    }

    // Table running until the end of the page
    if !rows.is_empty() {
        tables.push(Table {
            page_number: page.page_number,
            rows,
        });
    }

    tables
}

/// Columns covered by the second cell, up to the start of the third.
fn name_column_of(cells: &[Cell<'_>]) -> Option<Range<usize>> {
    let name = cells.get(1)?;
    let end = cells.get(2).map(|c| c.column).unwrap_or(usize::MAX);
    Some(name.column.saturating_sub(CONTINUATION_SLACK)..end)
}

/// Split `"12 Biscoito Recheado"` into `"12"` and `"Biscoito Recheado"`
/// when the quantity column sits one space from the name.
fn split_leading_quantity(cells: &mut Vec<Cell<'_>>) {
    let Some(&first) = cells.first() else {
        return;
    };
    let Some((quantity, rest)) = first.text.split_once(' ') else {
        return;
    };
    let numeric = quantity.starts_with(|c: char| c.is_ascii_digit())
        && quantity.chars().all(|c| c.is_ascii_digit() || c == ',');
    if !numeric {
        return;
    }

    cells[0].text = quantity;
    cells.insert(
        1,
        Cell {
            column: first.column + quantity.chars().count() + 1,
            text: rest,
        },
    );
}

/// Split a line by gaps of 2+ whitespace characters.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    split_cells(line).into_iter().map(|c| c.text).collect()
}

/// Like [`split_by_whitespace_gaps`], keeping each cell's start column.
pub fn split_cells(line: &str) -> Vec<Cell<'_>> {
    let mut cells = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut end = 0;
    let mut space_count = 0;

    for (column, (i, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some((s, col)) = start.take() {
                    cells.push(Cell {
                        column: col,
                        text: &line[s..end],
                    });
                }
            }
        } else {
            if start.is_none() {
                start = Some((i, column));
            }
            space_count = 0;
            end = i + c.len_utf8();
        }
    }

    if let Some((s, col)) = start {
        cells.push(Cell {
            column: col,
            text: &line[s..end],
        });
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_by_whitespace_gaps() {
        let segments = split_by_whitespace_gaps("3    Arroz Tipo 1   ALIMENTOS    10,50");
        assert_eq!(segments, vec!["3", "Arroz Tipo 1", "ALIMENTOS", "10,50"]);
    }

    #[test]
    fn test_split_keeps_accented_cells_intact() {
        let segments = split_by_whitespace_gaps("2  Sabão em pó  HIGIENE");
        assert_eq!(segments, vec!["2", "Sabão em pó", "HIGIENE"]);
    }

    #[test]
    fn test_single_spaces_do_not_split() {
        assert_eq!(
            split_by_whitespace_gaps("Nome: Maria da Silva"),
            vec!["Nome: Maria da Silva"]
        );
    }

    #[test]
    fn test_find_tables() {
        let page = PageContent {
            page_number: 1,
            lines: vec![
                "Pedido N°: 4521".into(),
                "Qtd   Produto           Categoria".into(),
                "3     Arroz             ALIMENTOS".into(),
                "1     Sabonete          HIGIENE".into(),
                "".into(),
                "Peso do pedido: 3 kg".into(),
                "2     Caderno           PAPELARIA".into(),
            ],
        };

        let tables = find_tables(&page);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 3);
        assert_eq!(tables[0].rows[1], vec!["3", "Arroz", "ALIMENTOS"]);
        assert_eq!(tables[1].rows, vec![vec!["2", "Caderno", "PAPELARIA"]]);
    }

    #[test]
    fn test_split_cells_reports_columns() {
        let cells = split_cells("  3      São Paulo  X");
        assert_eq!(
            cells,
            vec![
                Cell { column: 2, text: "3" },
                Cell { column: 9, text: "São Paulo" },
                Cell { column: 20, text: "X" },
            ]
        );
    }

    #[test]
    fn test_wrapped_name_joins_previous_row() {
        let page = PageContent {
            page_number: 1,
            lines: vec![
                "  3      Arroz Tipo 1 Parboilizado      ALIMENTOS      10,50".into(),
                "         Longo Fino".into(),
                "  2      Sabonete                       HIGIENE         4,20".into(),
            ],
        };

        let tables = find_tables(&page);
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0].rows[0],
            vec!["3", "Arroz Tipo 1 Parboilizado\nLongo Fino", "ALIMENTOS", "10,50"]
        );
        assert_eq!(tables[0].rows[1][1], "Sabonete");
    }

    #[test]
    fn test_line_outside_name_column_ends_table() {
        let page = PageContent {
            page_number: 1,
            lines: vec![
                "  3      Arroz      ALIMENTOS".into(),
                "Peso do pedido: 3 kg".into(),
                "                           Obs".into(),
            ],
        };

        let tables = find_tables(&page);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, vec![vec!["3", "Arroz", "ALIMENTOS"]]);
    }

    #[test]
    fn test_quantity_one_space_from_name_is_split() {
        let page = PageContent {
            page_number: 1,
            lines: vec!["  12 Biscoito Recheado      ALIMENTOS      3,50".into()],
        };

        let tables = find_tables(&page);
        assert_eq!(
            tables[0].rows[0],
            vec!["12", "Biscoito Recheado", "ALIMENTOS", "3,50"]
        );
    }

    #[test]
    fn test_leading_words_are_not_split() {
        let page = PageContent {
            page_number: 1,
            lines: vec!["Nome: Carlos Pereira      Nome: José Santos".into()],
        };

        let tables = find_tables(&page);
        assert_eq!(
            tables[0].rows[0],
            vec!["Nome: Carlos Pereira", "Nome: José Santos"]
        );
    }
}
