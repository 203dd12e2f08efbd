// Server-rendered search page

pub mod handlers;
