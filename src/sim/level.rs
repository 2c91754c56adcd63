//! Levels: a grid of tile codes laid out as blocks
//!
//! Level files are plain text: whitespace-separated tile codes, one row per
//! line. Row 0 is the top of the screen.

use std::path::Path;

use glam::{Vec2, Vec3};

use super::body::{Body, Sprite};
use crate::error::GameError;

/// Tile codes understood by the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCode {
    Empty,
    Solid,
    Blue,
    Green,
    Yellow,
    Orange,
}

impl TileCode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(TileCode::Empty),
            1 => Some(TileCode::Solid),
            2 => Some(TileCode::Blue),
            3 => Some(TileCode::Green),
            4 => Some(TileCode::Yellow),
            5 => Some(TileCode::Orange),
            _ => None,
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            TileCode::Empty => Vec3::ZERO,
            TileCode::Solid => Vec3::new(0.8, 0.8, 0.7),
            TileCode::Blue => Vec3::new(0.2, 0.6, 1.0),
            TileCode::Green => Vec3::new(0.0, 0.7, 0.0),
            TileCode::Yellow => Vec3::new(0.8, 0.8, 0.4),
            TileCode::Orange => Vec3::new(1.0, 0.5, 0.0),
        }
    }
}

/// Parsed tile codes, rectangular
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: Vec<Vec<u32>>,
}

impl TileGrid {
    /// Parse level text. Blank lines are skipped; ragged rows are rejected.
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let mut rows: Vec<Vec<u32>> = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<u32>().map_err(|_| {
                        GameError::invalid_level(format!(
                            "line {}: '{}' is not a tile code",
                            line_no + 1,
                            token
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(GameError::invalid_level(format!(
                        "line {}: expected {} tiles, found {}",
                        line_no + 1,
                        first.len(),
                        row.len()
                    )));
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(GameError::invalid_level("no tile rows"));
        }
        Ok(Self { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }
}

/// The blocks of one level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLevel {
    blocks: Vec<Body>,
}

impl GameLevel {
    /// Lay out a grid into a `level_width` x `level_height` area hanging from
    /// the top of a screen `screen_height` tall.
    pub fn from_grid(
        grid: &TileGrid,
        screen_height: f32,
        level_width: f32,
        level_height: f32,
    ) -> Self {
        let unit = Vec2::new(
            level_width / grid.column_count() as f32,
            level_height / grid.row_count() as f32,
        );

        let mut blocks = Vec::new();
        for (y, row) in grid.rows().iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let position = Vec2::new(unit.x * x as f32, screen_height - unit.y * y as f32);
                let block = match TileCode::from_code(code) {
                    Some(TileCode::Empty) => continue,
                    Some(TileCode::Solid) => {
                        let mut body = Body::new(position, unit, Sprite::BlockSolid)
                            .with_color(TileCode::Solid.color());
                        body.is_solid = true;
                        body
                    }
                    Some(tile) => Body::new(position, unit, Sprite::Block).with_color(tile.color()),
                    None => {
                        log::warn!("Unknown tile code {} at row {}, column {}", code, y, x);
                        continue;
                    }
                };
                blocks.push(block);
            }
        }

        Self { blocks }
    }

    /// Read and lay out a level file
    pub fn try_load(
        path: &Path,
        screen_height: f32,
        level_width: f32,
        level_height: f32,
    ) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ResourceMissing {
            path: path.to_path_buf(),
            source,
        })?;
        let grid = TileGrid::parse(&text)?;
        Ok(Self::from_grid(&grid, screen_height, level_width, level_height))
    }

    /// Like [`GameLevel::try_load`], but a broken file becomes an empty level
    pub fn load(path: &Path, screen_height: f32, level_width: f32, level_height: f32) -> Self {
        match Self::try_load(path, screen_height, level_width, level_height) {
            Ok(level) => {
                log::info!(
                    "Loaded level {} ({} blocks)",
                    path.display(),
                    level.blocks.len()
                );
                level
            }
            Err(e) => {
                log::error!("Failed to load level: {}", e);
                Self::default()
            }
        }
    }

    pub fn blocks(&self) -> &[Body] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Body] {
        &mut self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Every destructible block is gone (trivially true with no blocks)
    pub fn is_completed(&self) -> bool {
        self.blocks
            .iter()
            .all(|block| block.is_solid || block.is_destroyed)
    }

    /// Bring every block back
    pub fn reset(&mut self) {
        for block in &mut self.blocks {
            block.is_destroyed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LEVEL: &str = "1 1 1 1\n2 3 4 5\n0 2 0 2\n";

    #[test]
    fn test_parse_grid() {
        let grid = TileGrid::parse(LEVEL).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 4);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_extra_spaces() {
        let grid = TileGrid::parse("\n  1   2 \n\n3 4\n\n").unwrap();
        assert_eq!(grid.rows(), &[vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = TileGrid::parse("1 1 1\n2 2\n").unwrap_err();
        assert!(matches!(err, GameError::InvalidLevelData { .. }));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TileGrid::parse("1 x 1\n").is_err());
        assert!(TileGrid::parse("1 -2 1\n").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            TileGrid::parse("  \n\n"),
            Err(GameError::InvalidLevelData { .. })
        ));
    }

    #[test]
    fn test_layout() {
        let grid = TileGrid::parse(LEVEL).unwrap();
        let level = GameLevel::from_grid(&grid, 600.0, 800.0, 300.0);
        // 4 solid + 4 colored + 2 colored; empties skipped
        assert_eq!(level.blocks().len(), 10);

        let first = &level.blocks()[0];
        assert!(first.is_solid);
        assert_eq!(first.position, Vec2::new(0.0, 600.0));
        assert_eq!(first.size, Vec2::new(200.0, 100.0));
        assert_eq!(first.sprite, Sprite::BlockSolid);

        // Row 1 sits one tile lower
        let blue = &level.blocks()[4];
        assert!(!blue.is_solid);
        assert_eq!(blue.position, Vec2::new(0.0, 500.0));
        assert_eq!(blue.color, TileCode::Blue.color());

        let orange = &level.blocks()[7];
        assert_eq!(orange.color, TileCode::Orange.color());
        assert_eq!(orange.position.x, 600.0);

        let last = &level.blocks()[9];
        assert_eq!(last.position, Vec2::new(600.0, 400.0));
    }

    #[test]
    fn test_unknown_codes_are_skipped() {
        let grid = TileGrid::parse("9 2\n").unwrap();
        let level = GameLevel::from_grid(&grid, 600.0, 800.0, 300.0);
        assert_eq!(level.blocks().len(), 1);
    }

    #[test]
    fn test_completion_and_reset() {
        let grid = TileGrid::parse(LEVEL).unwrap();
        let mut level = GameLevel::from_grid(&grid, 600.0, 800.0, 300.0);
        assert!(!level.is_completed());

        for block in level.blocks_mut().iter_mut().filter(|b| !b.is_solid) {
            block.is_destroyed = true;
        }
        assert!(level.is_completed());

        level.reset();
        assert!(level.blocks().iter().all(|b| !b.is_destroyed));
        assert!(!level.is_completed());
    }

    #[test]
    fn test_only_solid_blocks_is_completed() {
        let grid = TileGrid::parse("1 1\n1 0\n").unwrap();
        let level = GameLevel::from_grid(&grid, 600.0, 800.0, 300.0);
        assert!(level.is_completed());
    }

    #[test]
    fn test_missing_file_yields_completed_empty_level() {
        let level = GameLevel::load(
            Path::new("/definitely/not/here.level"),
            600.0,
            800.0,
            300.0,
        );
        assert!(level.is_empty());
        assert!(level.is_completed());
    }

    #[test]
    fn test_try_load_reports_missing_file() {
        let err = GameLevel::try_load(Path::new("/definitely/not/here.level"), 600.0, 800.0, 300.0)
            .unwrap_err();
        assert!(matches!(err, GameError::ResourceMissing { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir()
            .join(format!("brick_breaker_level_{}.level", std::process::id()));
        std::fs::write(&path, LEVEL).unwrap();
        let level = GameLevel::load(&path, 600.0, 800.0, 300.0);
        std::fs::remove_file(&path).ok();
        assert_eq!(level.blocks().len(), 10);
    }

    proptest! {
        #[test]
        fn prop_completed_iff_destructibles_destroyed(
            codes in proptest::collection::vec(0u32..6, 12),
            destroyed in proptest::collection::vec(any::<bool>(), 12),
        ) {
            let text = codes
                .chunks(4)
                .map(|row| row.iter().map(u32::to_string).collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n");
            let grid = TileGrid::parse(&text).unwrap();
            let mut level = GameLevel::from_grid(&grid, 600.0, 800.0, 300.0);
            for (block, &flag) in level.blocks_mut().iter_mut().zip(&destroyed) {
                block.is_destroyed = flag;
            }

            let expected = level.blocks().iter().filter(|b| !b.is_solid).all(|b| b.is_destroyed);
            prop_assert_eq!(level.is_completed(), expected);
        }
    }
}
