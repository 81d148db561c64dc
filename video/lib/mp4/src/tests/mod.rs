mod header;
mod movie;
mod tables;
