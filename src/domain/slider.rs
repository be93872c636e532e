use std::ops::RangeInclusive;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ButtonVariant, HexColor, LinkTarget, OverlayOpacity, SlideId, SliderId, SliderName, Slug,
    SortOrder, TextAlign, TypeConstraintError,
};

/// Named carousel; the storefront renders the one with slug `home-hero`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slider {
    pub id: SliderId,
    pub name: SliderName,
    pub slug: Slug,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSlider {
    pub name: SliderName,
    pub slug: Slug,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    pub slider_id: SliderId,
    pub content: SlideContent,
    pub sort_order: SortOrder,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Slide {
    /// Whether the slide is published and `now` lies inside its publish window.
    pub fn is_visible_at(&self, now: NaiveDateTime) -> bool {
        let content = &self.content;
        content.is_published
            && content.publish_at.is_none_or(|start| start <= now)
            && content.unpublish_at.is_none_or(|end| now < end)
    }
}

/// Editable part of a slide.
///
/// Image paths are either storage keys in the `sliders` bucket or absolute
/// `http(s)` URLs added through the "image URL" mode of the admin form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlideContent {
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<LinkTarget>,
    pub desktop_image_path: String,
    pub mobile_image_path: Option<String>,
    pub alt: String,
    pub overlay_opacity: OverlayOpacity,
    pub text_align: TextAlign,
    pub text_color: HexColor,
    pub button_variant: ButtonVariant,
    pub is_published: bool,
    pub publish_at: Option<NaiveDateTime>,
    pub unpublish_at: Option<NaiveDateTime>,
}

impl SlideContent {
    /// Alt text fallback chain: title, explicit alt, then a generic label.
    pub fn resolve_alt(title: Option<&str>, alt: Option<&str>) -> String {
        title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| alt.map(str::trim).filter(|a| !a.is_empty()))
            .unwrap_or("Slide")
            .to_string()
    }

    /// Rejects publish windows that end before they start.
    pub fn check_window(&self) -> Result<(), TypeConstraintError> {
        match (self.publish_at, self.unpublish_at) {
            (Some(start), Some(end)) if end <= start => Err(TypeConstraintError::InvalidValue(
                "unpublish_at must be after publish_at".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Playback options of a slider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SliderSettings {
    pub autoplay_ms: i32,
    pub transition_ms: i32,
    pub loop_enabled: bool,
    pub pause_on_hover: bool,
    pub show_arrows: bool,
    pub show_dots: bool,
    pub show_progress: bool,
}

impl SliderSettings {
    pub const AUTOPLAY_RANGE: RangeInclusive<i32> = 2000..=15000;
    pub const TRANSITION_RANGE: RangeInclusive<i32> = 200..=1200;

    /// Validated constructor.
    pub fn new(
        autoplay_ms: i32,
        transition_ms: i32,
        loop_enabled: bool,
        pause_on_hover: bool,
        show_arrows: bool,
        show_dots: bool,
        show_progress: bool,
    ) -> Result<Self, TypeConstraintError> {
        if !Self::AUTOPLAY_RANGE.contains(&autoplay_ms) {
            return Err(TypeConstraintError::OutOfRange("autoplay_ms"));
        }
        if !Self::TRANSITION_RANGE.contains(&transition_ms) {
            return Err(TypeConstraintError::OutOfRange("transition_ms"));
        }
        Ok(Self {
            autoplay_ms,
            transition_ms,
            loop_enabled,
            pause_on_hover,
            show_arrows,
            show_dots,
            show_progress,
        })
    }

    /// Settings the storefront uses when a slider has no settings row.
    pub const fn fallback() -> Self {
        Self {
            autoplay_ms: 8000,
            transition_ms: 800,
            loop_enabled: true,
            pause_on_hover: true,
            show_arrows: true,
            show_dots: true,
            show_progress: true,
        }
    }
}

impl Default for SliderSettings {
    /// Initial values of the admin settings form.
    fn default() -> Self {
        Self {
            autoplay_ms: 6000,
            transition_ms: 600,
            loop_enabled: true,
            pause_on_hover: true,
            show_arrows: false,
            show_dots: false,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn slide(is_published: bool, start: Option<u32>, end: Option<u32>) -> Slide {
        Slide {
            id: SlideId::new(1).unwrap(),
            slider_id: SliderId::new(1).unwrap(),
            content: SlideContent {
                eyebrow: None,
                title: None,
                description: None,
                cta_label: None,
                cta_url: None,
                desktop_image_path: "slides/1-a.jpg".into(),
                mobile_image_path: None,
                alt: "Slide".into(),
                overlay_opacity: OverlayOpacity::default(),
                text_align: TextAlign::default(),
                text_color: HexColor::default(),
                button_variant: ButtonVariant::default(),
                is_published,
                publish_at: start.map(at),
                unpublish_at: end.map(at),
            },
            sort_order: SortOrder::new(1).unwrap(),
            created_at: at(0),
            updated_at: at(0),
        }
    }

    #[test]
    fn visibility_respects_publish_window() {
        assert!(slide(true, None, None).is_visible_at(at(10)));
        assert!(!slide(false, None, None).is_visible_at(at(10)));
        assert!(!slide(true, Some(11), None).is_visible_at(at(10)));
        assert!(slide(true, Some(9), Some(11)).is_visible_at(at(10)));
        assert!(!slide(true, Some(9), Some(10)).is_visible_at(at(10)));
        assert!(slide(true, Some(10), None).is_visible_at(at(10) + Duration::seconds(1)));
    }

    #[test]
    fn window_must_end_after_start() {
        assert!(slide(true, Some(12), Some(11)).content.check_window().is_err());
        assert!(slide(true, Some(11), Some(12)).content.check_window().is_ok());
    }

    #[test]
    fn alt_prefers_title() {
        assert_eq!(SlideContent::resolve_alt(Some("Yaz"), Some("x")), "Yaz");
        assert_eq!(SlideContent::resolve_alt(Some(" "), Some("Kampanya")), "Kampanya");
        assert_eq!(SlideContent::resolve_alt(None, None), "Slide");
    }

    #[test]
    fn settings_ranges_are_enforced() {
        assert!(SliderSettings::new(1999, 600, true, true, false, false, true).is_err());
        assert!(SliderSettings::new(6000, 1300, true, true, false, false, true).is_err());
        assert!(SliderSettings::new(15000, 200, true, true, false, false, true).is_ok());
        assert_eq!(SliderSettings::fallback().autoplay_ms, 8000);
        assert_eq!(SliderSettings::default().transition_ms, 600);
    }
}
