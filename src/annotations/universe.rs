use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::{GoError, GoResult};

/// The gene symbols that annotations may refer to
///
/// Annotations of genes outside the universe are dropped during ingestion.
///
/// # Examples
///
/// ```
/// use geneontology::GeneUniverse;
///
/// let tsv = "TP53\tENSG00000141510\t17\nBRCA1\tENSG00000012048\t17\n";
/// let universe = GeneUniverse::from_tsv(tsv.as_bytes()).unwrap();
///
/// assert_eq!(universe.len(), 2);
/// assert!(universe.contains("TP53"));
/// assert!(!universe.contains("tp53"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneUniverse {
    genes: BTreeSet<String>,
}

impl GeneUniverse {
    /// Constructs a universe from gene symbols
    pub fn new<I, S>(genes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genes: genes.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads a tab-separated gene file, using the first column of
    /// every non-empty line as gene symbol
    ///
    /// # Errors
    ///
    /// [`GoError::InvalidInput`] if the reader fails
    pub fn from_tsv<R: BufRead>(reader: R) -> GoResult<Self> {
        let mut genes = BTreeSet::new();
        for line in reader.lines() {
            let line = line
                .map_err(|err| GoError::InvalidInput(format!("unable to read gene file: {err}")))?;
            if let Some(symbol) = line.split('\t').next().filter(|symbol| !symbol.is_empty()) {
                genes.insert(symbol.to_string());
            }
        }
        info!("Read {} genes", genes.len());
        Ok(Self { genes })
    }

    /// Reads a (possibly gzip-compressed) tab-separated gene file
    ///
    /// # Errors
    ///
    /// [`GoError::CannotOpenFile`] if the file cannot be opened
    pub fn from_tsv_file<P: AsRef<Path>>(path: P) -> GoResult<Self> {
        Self::from_tsv(crate::utils::open_reader(path)?)
    }

    /// Returns the number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the universe contains no genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns `true` if the gene symbol is part of the universe
    pub fn contains(&self, gene: &str) -> bool {
        self.genes.contains(gene)
    }

    pub(crate) fn get(&self, gene: &str) -> Option<&str> {
        self.genes.get(gene).map(String::as_str)
    }

    /// Returns an iterator of all gene symbols in alphabetical order
    pub fn iter(&self) -> std::collections::btree_set::Iter<'_, String> {
        self.genes.iter()
    }
}

impl<'a> IntoIterator for &'a GeneUniverse {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn skips_empty_lines_and_duplicates() {
        let tsv = "TP53\tx\n\nTP53\ty\nEGFR\n";
        let universe = GeneUniverse::from_tsv(tsv.as_bytes()).unwrap();
        let genes: Vec<&String> = universe.iter().collect();
        assert_eq!(genes, vec!["EGFR", "TP53"]);
    }

    #[test]
    fn from_symbols() {
        let universe = GeneUniverse::new(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(universe.len(), 2);
        assert!(!universe.is_empty());
        assert!(GeneUniverse::default().is_empty());
    }
}
