//! Request and response models of the APIs under test

pub mod board;
pub mod pet;
pub mod uspto;

pub use board::{Board, Mark, MarkRequest, Status, BOARD_SIZE};
pub use pet::{Pet, PetstoreError};
pub use uspto::{DataSetEntry, DataSetList, SearchCriteria, SearchResponse, SearchResult};
