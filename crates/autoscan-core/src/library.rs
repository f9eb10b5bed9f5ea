use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier the remote service uses to address a library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryId(pub String);

impl LibraryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LibraryId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Library {
    pub id: LibraryId,
    pub name: String,
    pub path: String,
}

/// No library root is a prefix of the folder.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{folder}: failed determining libraries")]
pub struct UnmatchedFolder {
    pub folder: String,
}

/// The libraries known to a target, in the order the remote service listed
/// them. Fixed for the lifetime of the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryCatalog {
    libraries: Vec<Library>,
}

impl LibraryCatalog {
    pub fn new(libraries: Vec<Library>) -> Self {
        Self { libraries }
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// Returns every library whose path is a literal string prefix of
    /// `folder`. Path boundaries are not checked, so `/media/Mov` also
    /// claims `/media/Movies2/...`.
    pub fn resolve(&self, folder: &str) -> Result<Vec<&Library>, UnmatchedFolder> {
        let matched: Vec<&Library> = self
            .libraries
            .iter()
            .filter(|library| folder.starts_with(library.path.as_str()))
            .collect();

        if matched.is_empty() {
            return Err(UnmatchedFolder {
                folder: folder.to_owned(),
            });
        }

        Ok(matched)
    }
}

impl From<Vec<Library>> for LibraryCatalog {
    fn from(libraries: Vec<Library>) -> Self {
        Self::new(libraries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(id: &str, name: &str, path: &str) -> Library {
        Library {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }

    fn ids(libraries: &[&Library]) -> Vec<String> {
        libraries.iter().map(|library| library.id.to_string()).collect()
    }

    #[test]
    fn resolves_single_library_by_prefix() {
        let catalog = LibraryCatalog::new(vec![
            library("1", "Movies", "/data/movies"),
            library("2", "TV", "/data/tv"),
        ]);

        let matched = catalog.resolve("/data/movies/Inception (2010)").expect("match");
        assert_eq!(ids(&matched), vec!["1"]);
    }

    #[test]
    fn nested_roots_all_match_in_catalog_order() {
        let catalog = LibraryCatalog::new(vec![
            library("7", "4K Movies", "/data/movies/4k"),
            library("3", "Everything", "/data"),
            library("1", "Movies", "/data/movies"),
        ]);

        let matched = catalog.resolve("/data/movies/4k/Dune (2021)").expect("match");
        assert_eq!(ids(&matched), vec!["7", "3", "1"]);
    }

    #[test]
    fn prefix_match_ignores_path_boundaries() {
        let catalog = LibraryCatalog::new(vec![library("1", "Mov", "/media/Mov")]);

        let matched = catalog.resolve("/media/Movies2/Heat (1995)").expect("match");
        assert_eq!(ids(&matched), vec!["1"]);
    }

    #[test]
    fn duplicate_roots_are_not_deduplicated() {
        let catalog = LibraryCatalog::new(vec![
            library("1", "Movies", "/data/movies"),
            library("2", "Movies (copy)", "/data/movies"),
        ]);

        let matched = catalog.resolve("/data/movies/Heat (1995)").expect("match");
        assert_eq!(ids(&matched), vec!["1", "2"]);
    }

    #[test]
    fn folder_outside_every_library_is_unmatched() {
        let catalog = LibraryCatalog::new(vec![library("1", "Movies", "/data/movies")]);

        let err = catalog.resolve("/data/music/Album").expect_err("no match");
        assert_eq!(err.folder, "/data/music/Album");
        assert!(catalog.resolve("/data/mov").is_err());
    }

    #[test]
    fn empty_catalog_never_matches() {
        let catalog = LibraryCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.resolve("/data/movies").is_err());
    }
}
