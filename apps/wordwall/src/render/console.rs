use crate::layout::Grid;

/// Rows followed by the letter count, as printed by `wordwall generate`.
pub fn render_text(grid: &Grid) -> String {
    let mut out = String::new();
    for line in grid.lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("\nTotal letters: {}\n", grid.total_letters()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_lists_rows_and_total() {
        let grid = Grid::from_lines(["JTlovesKira", "lovesJT"]);
        assert_eq!(
            render_text(&grid),
            "JTlovesKira\nlovesJT\n\nTotal letters: 18\n"
        );
    }

    #[test]
    fn test_render_text_empty_grid() {
        assert_eq!(render_text(&Grid::default()), "\nTotal letters: 0\n");
    }
}
