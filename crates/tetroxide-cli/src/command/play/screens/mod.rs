pub(crate) use self::{game::GameScreen, title::TitleScreen};

mod game;
mod title;
