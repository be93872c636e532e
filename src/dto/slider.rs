use serde::Serialize;

use crate::domain::slider::{Slide, Slider, SliderSettings};
use crate::storage::{Bucket, ImageUrlResolver};

/// A slide ready for rendering, with image URLs resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlideView {
    pub id: i32,
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub desktop_image_url: String,
    pub mobile_image_url: Option<String>,
    pub alt: String,
    pub overlay_opacity: f64,
    pub text_align: &'static str,
    pub text_color: String,
    pub button_variant: &'static str,
    pub sort_order: i32,
    pub is_published: bool,
    pub publish_at: Option<String>,
    pub unpublish_at: Option<String>,
}

impl SlideView {
    /// `None` when the desktop image cannot be resolved to a URL.
    pub fn new(slide: &Slide, urls: &ImageUrlResolver) -> Option<Self> {
        let content = &slide.content;
        let desktop_image_url = urls.resolve(Bucket::Sliders, &content.desktop_image_path)?;
        Some(Self {
            id: slide.id.get(),
            eyebrow: content.eyebrow.clone(),
            title: content.title.clone(),
            description: content.description.clone(),
            cta_label: content.cta_label.clone(),
            cta_url: content.cta_url.as_ref().map(|url| url.as_str().to_string()),
            mobile_image_url: content
                .mobile_image_path
                .as_deref()
                .and_then(|path| urls.resolve(Bucket::Sliders, path)),
            desktop_image_url,
            alt: content.alt.clone(),
            overlay_opacity: content.overlay_opacity.get(),
            text_align: content.text_align.as_str(),
            text_color: content.text_color.as_str().to_string(),
            button_variant: content.button_variant.as_str(),
            sort_order: slide.sort_order.get(),
            is_published: content.is_published,
            publish_at: content
                .publish_at
                .map(|at| at.format("%Y-%m-%dT%H:%M").to_string()),
            unpublish_at: content
                .unpublish_at
                .map(|at| at.format("%Y-%m-%dT%H:%M").to_string()),
        })
    }
}

/// Everything the home hero carousel needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeroView {
    pub slides: Vec<SlideView>,
    pub settings: SliderSettings,
}

/// Slider page of the back office.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SliderAdminView {
    pub slider: Slider,
    pub slides: Vec<SlideView>,
    pub settings: SliderSettings,
    /// Whether `settings` come from a stored row or are form defaults.
    pub has_settings: bool,
}
