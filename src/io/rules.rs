//! Rule file parsing
//!
//! One tile per non-blank line, `;`-separated:
//! `<image file>;<top>;<right>;<bottom>;<left>`. Fields are trimmed. The line
//! order fixes the tile ids.

use std::path::{Path, PathBuf};

use crate::algorithm::compatibility::{CompatibilityTable, EdgeLabels};
use crate::io::configuration::{RULE_FIELD_COUNT, RULE_FIELD_SEPARATOR};
use crate::io::error::{AlgorithmError, Result, invalid_rule};

/// A declared tile: its image and the labels on its four edges
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRule {
    /// Image file name, relative to the tiles directory
    pub image: PathBuf,
    /// Edge labels matched against neighbors' opposite edges
    pub edges: EdgeLabels,
}

/// Ordered tile declarations read from a rule source
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<TileRule>,
}

impl RuleSet {
    /// Parse rule text
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuleData` naming the line for a wrong field count or an
    /// empty image name, or without a line if no tiles are declared
    pub fn parse(text: &str) -> Result<Self> {
        let mut rules = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            rules.push(parse_line(index + 1, line)?);
        }

        if rules.is_empty() {
            return Err(invalid_rule(None, &"no tiles declared"));
        }
        Ok(Self { rules })
    }

    /// Read and parse a rule file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read, otherwise as
    /// [`RuleSet::parse`]
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read rules",
            source: e,
        })?;
        let rule_set = Self::parse(&text)?;
        tracing::info!(path = %path.display(), tiles = rule_set.len(), "loaded rules");
        Ok(rule_set)
    }

    /// Check that every referenced image exists under `tiles_dir`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuleData` for the first reference to a missing file
    pub fn verify_images(&self, tiles_dir: &Path) -> Result<()> {
        for (tile, rule) in self.rules.iter().enumerate() {
            let path = tiles_dir.join(&rule.image);
            if !path.is_file() {
                return Err(invalid_rule(
                    None,
                    &format!(
                        "unknown tile reference '{}' for tile {tile} (looked in '{}')",
                        rule.image.display(),
                        tiles_dir.display()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Build the adjacency relation from the declared edge labels
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuleData` if the set is empty
    pub fn compatibility_table(&self) -> Result<CompatibilityTable> {
        let labels: Vec<EdgeLabels> = self.rules.iter().map(|rule| rule.edges.clone()).collect();
        CompatibilityTable::from_labels(&labels)
    }

    /// Declared tiles in id order
    pub fn rules(&self) -> &[TileRule] {
        &self.rules
    }

    /// Number of declared tiles
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no tiles are declared
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<TileRule> {
    let fields: Vec<&str> = line.split(RULE_FIELD_SEPARATOR).map(str::trim).collect();
    let [image, top, right, bottom, left] = fields.as_slice() else {
        return Err(invalid_rule(
            Some(line_number),
            &format!(
                "expected {RULE_FIELD_COUNT} fields separated by '{RULE_FIELD_SEPARATOR}', found {}",
                fields.len()
            ),
        ));
    };

    if image.is_empty() {
        return Err(invalid_rule(Some(line_number), &"empty image name"));
    }

    Ok(TileRule {
        image: PathBuf::from(*image),
        edges: EdgeLabels::new(
            (*top).to_string(),
            (*right).to_string(),
            (*bottom).to_string(),
            (*left).to_string(),
        ),
    })
}
