use std::fmt;
use derive_more::{Display, Error};
use crate::Tileset;

/// Expectations a tileset must meet before a level may reference it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ValidationRules {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Extension every bitmap must carry, without the dot. Compared case-insensitively.
    pub image_extension: String,
    /// Ids must form the range 0..len.
    pub require_contiguous_ids: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            tile_width: 64,
            tile_height: 64,
            image_extension: String::from("bmp"),
            require_contiguous_ids: true,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Display, Debug)]
pub enum ValidationIssue {
    #[display(fmt="Declared tile count is {declared} but {actual} tiles are defined")]
    TileCountMismatch { declared: u32, actual: usize },
    #[display(fmt="Tile {id} is {width}x{height}, expected {expected_width}x{expected_height}")]
    WrongDimensions { id: u32, width: u32, height: u32, expected_width: u32, expected_height: u32 },
    #[display(fmt="Tile {id} has an empty image path")]
    EmptyImagePath { id: u32 },
    #[display(fmt="Tile {id} image '{path}' is not a .{expected} file")]
    WrongExtension { id: u32, path: String, expected: String },
    #[display(fmt="Expected tile id {expected} but found {found}")]
    IdGap { expected: u32, found: u32 },
}

/// Every issue found in a tileset.
#[derive(Clone, Eq, PartialEq, Error, Debug)]
pub struct ValidationErrors(#[error(not(source))] pub Vec<ValidationIssue>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tileset has {} issue(s)", self.0.len())?;
        for issue in &self.0 {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

impl Tileset {

    /// Collects every rule the tileset breaks.
    /// Duplicate ids cannot occur here, they are rejected when the tileset is built.
    pub fn issues(&self, rules: &ValidationRules) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if let Some(declared) = self.tile_count {
            if declared as usize != self.len() {
                issues.push(ValidationIssue::TileCountMismatch { declared, actual: self.len() });
            }
        }

        let expected_suffix = format!(".{}", rules.image_extension.to_ascii_lowercase());
        for (index, tile) in self.iter().enumerate() {
            if rules.require_contiguous_ids && tile.id != index as u32 {
                // Tiles are sorted, so the first gap explains the rest.
                if !issues.iter().any(|issue| matches!(issue, ValidationIssue::IdGap { .. })) {
                    issues.push(ValidationIssue::IdGap { expected: index as u32, found: tile.id });
                }
            }
            if tile.width != rules.tile_width || tile.height != rules.tile_height {
                issues.push(ValidationIssue::WrongDimensions {
                    id: tile.id,
                    width: tile.width,
                    height: tile.height,
                    expected_width: rules.tile_width,
                    expected_height: rules.tile_height,
                });
            }
            if tile.image_path.is_empty() {
                issues.push(ValidationIssue::EmptyImagePath { id: tile.id });
            }
            else if !tile.image_path.to_ascii_lowercase().ends_with(&expected_suffix) {
                issues.push(ValidationIssue::WrongExtension {
                    id: tile.id,
                    path: tile.image_path.clone(),
                    expected: rules.image_extension.clone(),
                });
            }
        }
        issues
    }

    /// Fails with every issue found, if any.
    pub fn validate(&self, rules: &ValidationRules) -> Result<(), ValidationErrors> {
        let issues = self.issues(rules);
        if issues.is_empty() {
            Ok(())
        }
        else {
            Err(ValidationErrors(issues))
        }
    }
}
