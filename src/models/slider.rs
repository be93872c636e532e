use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::slider::{
    NewSlider as DomainNewSlider, Slide as DomainSlide, SlideContent, Slider as DomainSlider,
    SliderSettings as DomainSliderSettings,
};
use crate::domain::types::{
    ButtonVariant, HexColor, LinkTarget, OverlayOpacity, SliderName, Slug, SortOrder, TextAlign,
    TypeConstraintError,
};

/// Diesel model representing the `sliders` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sliders)]
pub struct Slider {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::sliders)]
pub struct NewSlider {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

/// Diesel model representing the `slides` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::slides)]
pub struct Slide {
    pub id: i32,
    pub slider_id: i32,
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub desktop_image_path: String,
    pub mobile_image_path: Option<String>,
    pub alt: String,
    pub overlay_opacity: f64,
    pub text_align: String,
    pub text_color: String,
    pub button_variant: String,
    pub sort_order: i32,
    pub is_published: bool,
    pub publish_at: Option<NaiveDateTime>,
    pub unpublish_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable slide columns; `sort_order` is assigned by the repository.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::slides)]
#[diesel(treat_none_as_null = true)]
pub struct SlideChanges {
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub desktop_image_path: String,
    pub mobile_image_path: Option<String>,
    pub alt: String,
    pub overlay_opacity: f64,
    pub text_align: String,
    pub text_color: String,
    pub button_variant: String,
    pub is_published: bool,
    pub publish_at: Option<NaiveDateTime>,
    pub unpublish_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `slider_settings` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::slider_settings)]
#[diesel(primary_key(slider_id))]
pub struct SliderSettings {
    pub slider_id: i32,
    pub autoplay_ms: i32,
    pub transition_ms: i32,
    pub loop_enabled: bool,
    pub pause_on_hover: bool,
    pub show_arrows: bool,
    pub show_dots: bool,
    pub show_progress: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Slider> for DomainSlider {
    type Error = TypeConstraintError;

    fn try_from(row: Slider) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            name: SliderName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&DomainNewSlider> for NewSlider {
    fn from(value: &DomainNewSlider) -> Self {
        Self {
            name: value.name.as_str().to_string(),
            slug: value.slug.as_str().to_string(),
            is_active: value.is_active,
        }
    }
}

impl TryFrom<Slide> for DomainSlide {
    type Error = TypeConstraintError;

    fn try_from(row: Slide) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            slider_id: row.slider_id.try_into()?,
            content: SlideContent {
                eyebrow: row.eyebrow,
                title: row.title,
                description: row.description,
                cta_label: row.cta_label,
                cta_url: row.cta_url.map(LinkTarget::new).transpose()?,
                desktop_image_path: row.desktop_image_path,
                mobile_image_path: row.mobile_image_path,
                alt: row.alt,
                overlay_opacity: OverlayOpacity::new(row.overlay_opacity)?,
                text_align: TextAlign::try_from(row.text_align)?,
                text_color: HexColor::new(row.text_color)?,
                button_variant: ButtonVariant::try_from(row.button_variant)?,
                is_published: row.is_published,
                publish_at: row.publish_at,
                unpublish_at: row.unpublish_at,
            },
            sort_order: SortOrder::new(row.sort_order)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&SlideContent> for SlideChanges {
    fn from(content: &SlideContent) -> Self {
        Self {
            eyebrow: content.eyebrow.clone(),
            title: content.title.clone(),
            description: content.description.clone(),
            cta_label: content.cta_label.clone(),
            cta_url: content.cta_url.as_ref().map(|url| url.as_str().to_string()),
            desktop_image_path: content.desktop_image_path.clone(),
            mobile_image_path: content.mobile_image_path.clone(),
            alt: content.alt.clone(),
            overlay_opacity: content.overlay_opacity.get(),
            text_align: content.text_align.as_str().to_string(),
            text_color: content.text_color.as_str().to_string(),
            button_variant: content.button_variant.as_str().to_string(),
            is_published: content.is_published,
            publish_at: content.publish_at,
            unpublish_at: content.unpublish_at,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<SliderSettings> for DomainSliderSettings {
    type Error = TypeConstraintError;

    fn try_from(row: SliderSettings) -> Result<Self, Self::Error> {
        DomainSliderSettings::new(
            row.autoplay_ms,
            row.transition_ms,
            row.loop_enabled,
            row.pause_on_hover,
            row.show_arrows,
            row.show_dots,
            row.show_progress,
        )
    }
}

impl SliderSettings {
    pub fn from_domain(slider_id: i32, settings: &DomainSliderSettings) -> Self {
        Self {
            slider_id,
            autoplay_ms: settings.autoplay_ms,
            transition_ms: settings.transition_ms,
            loop_enabled: settings.loop_enabled,
            pause_on_hover: settings.pause_on_hover,
            show_arrows: settings.show_arrows,
            show_dots: settings.show_dots,
            show_progress: settings.show_progress,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
