//! Session events - what happened during a command or tick
//!
//! The core never logs; it queues these and the frontend drains them
//! (to drive sounds, effects or a JSON event log).

use serde::Serialize;

use crate::pieces::PieceCells;
use crate::types::{GameMode, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionEvent {
    Spawned {
        kind: PieceKind,
        piece_id: u32,
    },
    Locked {
        kind: PieceKind,
        piece_id: u32,
        cells: PieceCells,
    },
    /// A lock completed `count` rows; scoring already applied.
    RowsCleared {
        count: u8,
        score_delta: u32,
        score: u32,
        lines: u32,
    },
    /// A cleared row finished animating and was removed from the board.
    RowCollapsed {
        row: u8,
    },
    /// A lock was rejected because the piece still reached above the top row.
    ToppedOut {
        piece_id: u32,
    },
    ModeChanged {
        from: GameMode,
        to: GameMode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag() {
        let ev = SessionEvent::ModeChanged {
            from: GameMode::Running,
            to: GameMode::GameOver,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(
            json,
            r#"{"event":"modeChanged","from":"running","to":"gameOver"}"#
        );
    }

    #[test]
    fn spawn_event_names_the_kind() {
        let ev = SessionEvent::Spawned {
            kind: PieceKind::T,
            piece_id: 3,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains(r#""kind":"t""#));
        assert!(json.contains(r#""pieceId":3"#));
    }

    #[test]
    fn event_fields_are_camel_case() {
        let ev = SessionEvent::RowsCleared {
            count: 2,
            score_delta: 200,
            score: 300,
            lines: 3,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(
            json,
            r#"{"event":"rowsCleared","count":2,"scoreDelta":200,"score":300,"lines":3}"#
        );
        assert!(!json.contains('_'));
    }
}
