//! GameView: paints a [`GameSnapshot`] into a framebuffer.
//!
//! Pure (no I/O), so every frame can be checked in unit tests.

use crate::core::snapshot::ActiveSnapshot;
use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style, BLACK, WELL};
use crate::types::{PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Information shown next to the board that the snapshot does not carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud {
    pub high_score: u32,
    /// Name of the policy while the autopilot is playing.
    pub autopilot: Option<&'static str>,
}

pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Width and height of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            u16::from(BOARD_WIDTH) * self.cell_w + 2,
            u16::from(BOARD_HEIGHT) + 2,
        )
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);

        let (frame_w, frame_h) = self.frame_size();
        let origin_x = viewport.width.saturating_sub(frame_w + PANEL_WIDTH) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;
        let board = BoardOrigin {
            x: origin_x + 1,
            y: origin_y + 1,
            cell_w: self.cell_w,
        };

        draw_frame(fb, origin_x, origin_y, frame_w, frame_h);

        for row in 0..BOARD_HEIGHT as usize {
            for col in 0..BOARD_WIDTH as usize {
                match snap.cell_kind(row, col) {
                    Some(kind) => board.paint(fb, row as i8, col as i8, '█', piece_style(kind)),
                    None => board.paint(fb, row as i8, col as i8, '·', Style::new(Rgb(70, 70, 82), WELL).dim()),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_row) = snap.ghost_row {
                let ghost = Style::new(Rgb(130, 130, 130), WELL).dim();
                for (row, col) in cells_at(&active, ghost_row) {
                    board.paint(fb, row, col, '░', ghost);
                }
            }
            for (row, col) in cells_at(&active, active.row) {
                board.paint(fb, row, col, '█', piece_style(active.kind).bold());
            }
        }

        self.draw_panel(fb, snap, hud, origin_x + frame_w + 2, origin_y);

        let banner = match snap.state {
            SessionState::Idle => Some("PRESS R"),
            SessionState::Paused => Some("PAUSED"),
            SessionState::GameOver => Some("GAME OVER"),
            SessionState::Running => None,
        };
        if let Some(text) = banner {
            let w = text.chars().count() as u16;
            let x = origin_x + frame_w.saturating_sub(w) / 2;
            fb.text(x, origin_y + frame_h / 2, text, Style::new(Rgb(255, 255, 255), BLACK).bold());
        }
    }

    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &Hud, x: u16, y: u16) {
        let label = Style::default().bold();
        let value = Style::default();

        let lines: [(&str, String); 4] = [
            ("SCORE", snap.score.to_string()),
            ("HIGH", hud.high_score.max(snap.score).to_string()),
            ("STATE", snap.state.as_str().to_ascii_uppercase()),
            ("AUTO", hud.autopilot.unwrap_or("off").to_string()),
        ];
        for (i, (name, text)) in lines.iter().enumerate() {
            let row = y + 3 * i as u16;
            fb.text(x, row, name, label);
            fb.text(x, row + 1, text, value);
        }

        let help = y + 13;
        let dim = Style::default().dim();
        for (i, line) in ["←→ move  ↑ rotate", "↓ drop  ␣ hard drop", "P pause  R reset", "Tab auto  Q quit"]
            .iter()
            .enumerate()
        {
            fb.text(x, help + i as u16, line, dim);
        }
    }
}

const PANEL_WIDTH: u16 = 22;

/// Top-left terminal position of board cell (0, 0).
struct BoardOrigin {
    x: u16,
    y: u16,
    cell_w: u16,
}

impl BoardOrigin {
    /// Paint one board cell; cells above or beside the board are skipped.
    fn paint(&self, fb: &mut FrameBuffer, row: i8, col: i8, ch: char, style: Style) {
        if !(0..BOARD_HEIGHT as i8).contains(&row) || !(0..BOARD_WIDTH as i8).contains(&col) {
            return;
        }
        let px = self.x + col as u16 * self.cell_w;
        let py = self.y + row as u16;
        fb.rect(px, py, self.cell_w, 1, ch, style);
    }
}

fn cells_at(active: &ActiveSnapshot, row: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
    let col = active.col;
    active
        .shape
        .filled_cells()
        .map(move |(dr, dc)| (row + dr, col + dc))
}

fn draw_frame(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = Style::new(Rgb(190, 190, 190), BLACK);
    let right = x + w - 1;
    let bottom = y + h - 1;
    for col in x + 1..right {
        fb.put(col, y, '─', style);
        fb.put(col, bottom, '─', style);
    }
    for row in y + 1..bottom {
        fb.put(x, row, '│', style);
        fb.put(right, row, '│', style);
    }
    fb.put(x, y, '┌', style);
    fb.put(right, y, '┐', style);
    fb.put(x, bottom, '└', style);
    fb.put(right, bottom, '┘', style);
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb(80, 220, 220),
        PieceKind::O => Rgb(240, 220, 80),
        PieceKind::T => Rgb(200, 120, 220),
        PieceKind::S => Rgb(100, 220, 120),
        PieceKind::Z => Rgb(220, 80, 80),
        PieceKind::J => Rgb(80, 120, 220),
        PieceKind::L => Rgb(255, 165, 0),
    }
}

fn piece_style(kind: PieceKind) -> Style {
    Style::new(piece_color(kind), WELL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            let row = fb.row_text(y);
            row.find(needle).map(|byte| (row[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn idle_session_shows_prompt() {
        let snap = GameSession::with_seed(1).snapshot();
        let fb = GameView::default().render(&snap, &Hud::default(), Viewport::new(80, 24));
        assert!(find(&fb, "PRESS R").is_some());
        assert!(find(&fb, "SCORE").is_some());
        assert!(find(&fb, "off").is_some());
    }

    #[test]
    fn active_piece_and_ghost_are_drawn() {
        let mut session = GameSession::with_seed(1);
        session.reset();
        session.spawn_kind(PieceKind::O);
        let snap = session.snapshot();
        let view = GameView::default();
        let fb = view.render(&snap, &Hud::default(), Viewport::new(80, 24));

        let (frame_w, frame_h) = view.frame_size();
        let ox = (80 - (frame_w + PANEL_WIDTH)) / 2;
        let oy = (24 - frame_h) / 2;

        // O at row 0, columns 4..6: terminal columns 8..12 inside the frame.
        let top = fb.get(ox + 1 + 8, oy + 1).unwrap();
        assert_eq!(top.ch, '█');
        assert_eq!(top.style.fg, piece_color(PieceKind::O));

        // Ghost on rows 18 and 19.
        assert_eq!(fb.get(ox + 1 + 8, oy + 1 + 19).unwrap().ch, '░');
        assert_eq!(fb.get(ox + 1, oy + 1 + 19).unwrap().ch, '·');
        assert!(find(&fb, "PRESS R").is_none());
    }

    #[test]
    fn hud_shows_high_score_and_autopilot() {
        let mut session = GameSession::with_seed(1);
        session.reset();
        session.pause();
        let hud = Hud {
            high_score: 42,
            autopilot: Some("heuristic"),
        };
        let fb = GameView::default().render(&session.snapshot(), &hud, Viewport::new(80, 24));
        assert!(find(&fb, "42").is_some());
        assert!(find(&fb, "heuristic").is_some());
        assert!(find(&fb, "PAUSED").is_some());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSession::with_seed(1).snapshot();
        let fb = GameView::default().render(&snap, &Hud::default(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
