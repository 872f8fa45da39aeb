pub mod suggester;
