//! Terminal front-end plumbing: a tick/render event loop and a stack of screens.

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event_loop;
mod runtime;
mod screen;
