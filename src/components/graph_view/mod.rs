//! Canvas view of a [`RenderModel`](crate::graph::RenderModel).
//!
//! Renders the projected graph on an HTML canvas with:
//! - Pre-computed node positions, sized and colored by the model
//! - Pan and zoom, with labels fading in as the view zooms in
//! - Eased transitions when nodes are filtered, dimmed, hovered, or selected
//! - Configurable theming and visual scaling
//!
//! # Example
//!
//! ```ignore
//! use atlas_graph::components::graph_view::GraphCanvas;
//!
//! view! {
//!     <GraphCanvas
//!         model=model
//!         on_hover=move |key| dispatch.run(Event::Hover(key))
//!         on_click=move |key| log::info!("clicked {key:?}")
//!         fullscreen=true
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::GraphCanvas;
pub use scale::ScaleConfig;
pub use theme::Theme;
