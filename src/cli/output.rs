//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for a duel run
pub fn create_duel_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Render a board with grid lines for the console
pub fn render_board(board: &crate::tictactoe::BoardState) -> String {
    let mut out = String::new();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let c = board.get(row * 3 + col).to_char();
                if c == '.' { ' ' } else { c }.to_string()
            })
            .collect();
        out.push_str(&format!("   {}\n", cells.join("|")));
        if row < 2 {
            out.push_str("   -----\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(100000), "100,000");
    }

    #[test]
    fn test_render_board() {
        let board = crate::tictactoe::BoardState::from_string("X.O......").unwrap();
        let rendered = render_board(&board);
        assert!(rendered.contains("X| |O"));
        assert!(rendered.contains("-----"));
    }
}
