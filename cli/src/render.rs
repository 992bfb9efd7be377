use std::fmt::Write;

use lines_core::*;

pub fn color_char(color: BallColor) -> char {
    match color {
        BallColor::Red => 'R',
        BallColor::Green => 'G',
        BallColor::Blue => 'B',
        BallColor::Yellow => 'Y',
        BallColor::Magenta => 'M',
        BallColor::Cyan => 'C',
        BallColor::Brown => 'N',
    }
}

/// Draws the board with 1-based row and column labels. The selected ball is marked with `>`.
pub fn render<G: BallGenerator>(engine: &BoardEngine<G>, scores: &impl ScoreTracker) -> String {
    let mut out = String::new();
    let (rows, cols) = engine.size();

    let _ = writeln!(out, "score {}  best {}", scores.score(), scores.high_score());
    let next: String = engine.next_colors().iter().map(|&c| color_char(c)).collect();
    let _ = writeln!(out, "next  {}", next);

    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, " {}", col + 1);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{:>2} ", row + 1);
        for col in 0..cols {
            let marker = if engine.selected() == Some((row, col)) { '>' } else { ' ' };
            let symbol = engine.cell_at((row, col)).color().map_or('.', color_char);
            out.push(marker);
            out.push(symbol);
        }
        out.push('\n');
    }

    out
}
