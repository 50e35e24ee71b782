//! Walks a scanned segment sequence and binds each map directive to its own
//! rendering surface.

use crate::animation::engine::PathAnimation;
use crate::core::config::MapConfig;
use crate::core::style::{is_known_style, resolve_style};
use crate::directive::scanner::Segment;
use crate::render::surface::{MapSurface, SurfaceFactory};
use crate::visibility::{VisibilityCoordinator, VisibilitySignal};
use crate::Result;
use std::time::Instant;

/// One rendered unit of the document: inert text or a live map binding
pub enum DocumentNode {
    Text(String),
    Map(MapBinding),
}

/// The live association between one decoded directive and one surface
pub struct MapBinding {
    id: String,
    config: MapConfig,
    surface: Box<dyn MapSurface>,
    animation: Option<PathAnimation>,
    visibility: VisibilityCoordinator,
    unmounted: bool,
}

impl MapBinding {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn animation(&self) -> Option<&PathAnimation> {
        self.animation.as_ref()
    }

    /// Starts a manually started (`autoStart=false`) animation
    pub fn start_animation(&mut self, now: Instant) {
        if let Some(engine) = self.animation.as_mut() {
            engine.start(now, self.surface.as_mut());
        }
    }

    pub fn pause_animation(&mut self, now: Instant) {
        if let Some(engine) = self.animation.as_mut() {
            engine.pause(now);
        }
    }

    pub fn resume_animation(&mut self, now: Instant) {
        if let Some(engine) = self.animation.as_mut() {
            engine.resume(now);
        }
    }

    /// Advances the binding's animation one frame
    pub fn tick(&mut self, now: Instant) {
        if let Some(engine) = self.animation.as_mut() {
            engine.tick(now, self.surface.as_mut());
        }
    }

    /// Feeds the binding's viewport visibility, pausing the animation while
    /// the binding is below the visibility threshold
    pub fn poll_visibility(&mut self, signal: &dyn VisibilitySignal, now: Instant) {
        if let Some(engine) = self.animation.as_mut() {
            self.visibility.poll(signal, engine, now);
        }
    }

    /// Re-centers the camera on the GeoJSON overlay, if any
    pub fn fit_to_overlay(&mut self) -> Result<()> {
        if let Some(geojson) = &self.config.geojson {
            if let Some(bounds) = geojson.data.bounds() {
                self.surface.set_camera(bounds.center(), self.config.zoom)?;
            }
        }
        Ok(())
    }

    /// Synchronously cancels the animation and releases surface resources
    ///
    /// Must run before the surface is torn down so no frame lands on a
    /// disposed surface.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        if let Some(engine) = self.animation.as_mut() {
            engine.cancel();
            if let Err(e) = self.surface.remove_layer(engine.layer_id()) {
                log::warn!("failed to remove layer {}: {}", engine.layer_id(), e);
            }
        }
        if let Err(e) = self.surface.clear_markers() {
            log::warn!("failed to clear markers for {}: {}", self.id, e);
        }
    }
}

/// A fully rendered document: text nodes interleaved with map bindings
pub struct RenderedDocument {
    nodes: Vec<DocumentNode>,
}

impl RenderedDocument {
    pub fn nodes(&self) -> &[DocumentNode] {
        &self.nodes
    }

    pub fn bindings(&self) -> impl Iterator<Item = &MapBinding> {
        self.nodes.iter().filter_map(|node| match node {
            DocumentNode::Map(binding) => Some(binding),
            DocumentNode::Text(_) => None,
        })
    }

    pub fn bindings_mut(&mut self) -> impl Iterator<Item = &mut MapBinding> {
        self.nodes.iter_mut().filter_map(|node| match node {
            DocumentNode::Map(binding) => Some(binding),
            DocumentNode::Text(_) => None,
        })
    }

    /// Advances every animated binding one frame
    pub fn tick(&mut self, now: Instant) {
        for binding in self.bindings_mut() {
            binding.tick(now);
        }
    }

    /// Unmounts every binding, cancelling animations before surfaces drop
    pub fn unmount(&mut self) {
        for binding in self.bindings_mut() {
            binding.unmount();
        }
    }
}

impl Drop for RenderedDocument {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Renders a scanned segment sequence against surfaces from the factory
///
/// Each map segment gets its own surface keyed by its position in the
/// sequence. A binding whose surface fails degrades to its literal directive
/// text; nothing here is fatal to the host document.
pub fn render(
    segments: &[Segment],
    factory: &mut dyn SurfaceFactory,
    now: Instant,
) -> RenderedDocument {
    let mut nodes = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Text { content } => nodes.push(DocumentNode::Text(content.clone())),
            Segment::Map { config, raw } => {
                let id = format!("maptext-map-{}", index);
                match bind(config, factory, &id, now) {
                    Ok(binding) => nodes.push(DocumentNode::Map(binding)),
                    Err(e) => {
                        log::warn!("binding {} degraded to text: {}", id, e);
                        nodes.push(DocumentNode::Text(raw.clone()));
                    }
                }
            }
        }
    }

    RenderedDocument { nodes }
}

fn bind(
    config: &MapConfig,
    factory: &mut dyn SurfaceFactory,
    id: &str,
    now: Instant,
) -> Result<MapBinding> {
    let mut surface = factory.create_surface(id)?;
    if !surface.is_style_loaded() {
        log::debug!("surface {} created before its initial style load", id);
    }
    if !is_known_style(&config.style_key) {
        log::debug!(
            "unknown style key {:?} for {}, using the default style",
            config.style_key,
            id
        );
    }

    surface.set_style(resolve_style(&config.style_key))?;
    surface.set_camera(config.coordinates, config.zoom)?;

    // Primary marker at the directive's coordinates, then one per decoded
    // marker.
    let title = config.title.as_deref().unwrap_or("Location");
    surface.add_marker(config.coordinates, title, config.title.as_deref())?;
    for marker in &config.markers {
        surface.add_marker(marker.position(), &marker.title, marker.description.as_deref())?;
    }

    if let Some(geojson) = &config.geojson {
        surface.add_fill_layer(&format!("{}-geojson", id), &geojson.data, &geojson.style)?;
    }

    let mut animation = None;
    if let Some(anim_config) = &config.animation {
        let length_m: f64 = anim_config
            .path
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum();
        log::debug!(
            "binding {} animates a {:.0} m path over {} ms",
            id,
            length_m,
            anim_config.duration_ms
        );
        let layer_id = format!("{}-path", id);
        surface.add_line_layer(&layer_id, &anim_config.color, anim_config.width)?;
        let mut engine = PathAnimation::new(anim_config.clone(), layer_id);
        if anim_config.auto_start {
            engine.start(now, surface.as_mut());
        }
        animation = Some(engine);
    }

    Ok(MapBinding {
        id: id.to_string(),
        config: config.clone(),
        surface,
        animation,
        visibility: VisibilityCoordinator::new(),
        unmounted: false,
    })
}
