mod authors;
mod covers;
mod search;
