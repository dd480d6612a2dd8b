pub mod ask;
pub mod convert;
pub mod playlist;
pub mod text;
