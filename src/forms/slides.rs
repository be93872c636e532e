use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::slider::{NewSlider, SlideContent, SliderSettings};
use crate::domain::types::{
    ButtonVariant, HexColor, LinkTarget, OverlayOpacity, SlideId, SliderId, SliderName, Slug,
    TextAlign, TypeConstraintError,
};
use crate::forms::{UploadError, flag, is_truthy, parse_id_list, read_upload, text};
use crate::storage::Upload;

pub const QUICK_SLIDE_TITLE: &str = "Resim";
pub const QUICK_SLIDE_ALT: &str = "Slider resmi";

#[derive(Debug, Error, PartialEq)]
pub enum SlideFormError {
    #[error("Slider ID gerekli")]
    MissingSlider,
    #[error("Slide formu geçersiz: {0}")]
    Validation(String),
    #[error("Slide formu hatalı veri içeriyor: {0}")]
    TypeConstraint(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl From<ValidationErrors> for SlideFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SlideFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Desktop image chosen on the slide form.
#[derive(Debug, Clone, PartialEq)]
pub enum DesktopImage {
    Upload(Upload),
    /// Absolute `http(s)` URL stored as-is.
    External(String),
}

/// Parses a `datetime-local` value (`2025-05-01T10:30`, seconds optional).
pub fn parse_datetime_local(value: &str) -> Result<NaiveDateTime, SlideFormError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| SlideFormError::Validation(format!("Geçersiz tarih: {value}")))
}

fn parse_external_url(value: &str) -> Result<String, SlideFormError> {
    let value = value.trim();
    if (value.starts_with("http://") || value.starts_with("https://")) && value.len() > 8 {
        Ok(value.to_string())
    } else {
        Err(SlideFormError::Validation(
            "Görsel URL'si http(s) ile başlamalı".to_string(),
        ))
    }
}

fn desktop_image(
    image_source: Option<&str>,
    image_url: Option<String>,
    upload: Option<Upload>,
) -> Result<Option<DesktopImage>, SlideFormError> {
    match (image_source, image_url) {
        (Some("url"), Some(url)) => Ok(Some(DesktopImage::External(parse_external_url(&url)?))),
        _ => Ok(upload.map(DesktopImage::Upload)),
    }
}

/// Slide create/edit form of the back office.
#[derive(MultipartForm)]
pub struct SlideMultipartForm {
    pub eyebrow: Option<Text<String>>,
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub cta_label: Option<Text<String>>,
    pub cta_url: Option<Text<String>>,
    pub alt: Option<Text<String>>,
    pub overlay_opacity: Option<Text<String>>,
    pub text_align: Option<Text<String>>,
    pub text_color: Option<Text<String>>,
    pub button_variant: Option<Text<String>>,
    pub is_published: Option<Text<String>>,
    pub publish_at: Option<Text<String>>,
    pub unpublish_at: Option<Text<String>>,
    /// `upload` (default) or `url`.
    pub image_source: Option<Text<String>>,
    pub image_url: Option<Text<String>>,
    #[multipart(limit = "10MiB")]
    pub desktop_image: Option<TempFile>,
    #[multipart(limit = "10MiB")]
    pub mobile_image: Option<TempFile>,
    pub remove_mobile_image: Option<Text<String>>,
}

/// Slide text and presentation fields, without image paths.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideDetails {
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<LinkTarget>,
    pub alt: String,
    pub overlay_opacity: OverlayOpacity,
    pub text_align: TextAlign,
    pub text_color: HexColor,
    pub button_variant: ButtonVariant,
    pub is_published: bool,
    pub publish_at: Option<NaiveDateTime>,
    pub unpublish_at: Option<NaiveDateTime>,
}

impl SlideDetails {
    pub fn into_content(
        self,
        desktop_image_path: String,
        mobile_image_path: Option<String>,
    ) -> SlideContent {
        SlideContent {
            eyebrow: self.eyebrow,
            title: self.title,
            description: self.description,
            cta_label: self.cta_label,
            cta_url: self.cta_url,
            desktop_image_path,
            mobile_image_path,
            alt: self.alt,
            overlay_opacity: self.overlay_opacity,
            text_align: self.text_align,
            text_color: self.text_color,
            button_variant: self.button_variant,
            is_published: self.is_published,
            publish_at: self.publish_at,
            unpublish_at: self.unpublish_at,
        }
    }
}

/// Raw slide form values after trimming; blanks are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideFields {
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub alt: Option<String>,
    pub overlay_opacity: Option<String>,
    pub text_align: Option<String>,
    pub text_color: Option<String>,
    pub button_variant: Option<String>,
    pub is_published: bool,
    pub publish_at: Option<String>,
    pub unpublish_at: Option<String>,
}

impl TryFrom<SlideFields> for SlideDetails {
    type Error = SlideFormError;

    fn try_from(fields: SlideFields) -> Result<Self, Self::Error> {
        let overlay_opacity = match fields.overlay_opacity.as_deref() {
            Some(value) => OverlayOpacity::new(value.parse::<f64>().map_err(|_| {
                SlideFormError::Validation(format!("Geçersiz opaklık: {value}"))
            })?)?,
            None => OverlayOpacity::default(),
        };
        let publish_at = fields
            .publish_at
            .as_deref()
            .map(parse_datetime_local)
            .transpose()?;
        let unpublish_at = fields
            .unpublish_at
            .as_deref()
            .map(parse_datetime_local)
            .transpose()?;

        let details = Self {
            alt: SlideContent::resolve_alt(fields.title.as_deref(), fields.alt.as_deref()),
            eyebrow: fields.eyebrow,
            title: fields.title,
            description: fields.description,
            cta_label: fields.cta_label,
            cta_url: fields.cta_url.map(LinkTarget::new).transpose()?,
            overlay_opacity,
            text_align: fields
                .text_align
                .as_deref()
                .map(TextAlign::try_from)
                .transpose()?
                .unwrap_or_default(),
            text_color: fields
                .text_color
                .map(HexColor::new)
                .transpose()?
                .unwrap_or_default(),
            button_variant: fields
                .button_variant
                .as_deref()
                .map(ButtonVariant::try_from)
                .transpose()?
                .unwrap_or_default(),
            is_published: fields.is_published,
            publish_at,
            unpublish_at,
        };
        details
            .clone()
            .into_content(String::new(), None)
            .check_window()?;
        Ok(details)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideFormPayload {
    pub details: SlideDetails,
    /// Required when creating; on update `None` keeps the current image.
    pub desktop: Option<DesktopImage>,
    pub mobile: Option<Upload>,
    pub remove_mobile: bool,
}

impl TryFrom<SlideMultipartForm> for SlideFormPayload {
    type Error = SlideFormError;

    fn try_from(form: SlideMultipartForm) -> Result<Self, Self::Error> {
        let fields = SlideFields {
            eyebrow: text(&form.eyebrow),
            title: text(&form.title),
            description: text(&form.description),
            cta_label: text(&form.cta_label),
            cta_url: text(&form.cta_url),
            alt: text(&form.alt),
            overlay_opacity: text(&form.overlay_opacity),
            text_align: text(&form.text_align),
            text_color: text(&form.text_color),
            button_variant: text(&form.button_variant),
            is_published: flag(&form.is_published),
            publish_at: text(&form.publish_at),
            unpublish_at: text(&form.unpublish_at),
        };
        let upload = read_upload(form.desktop_image.as_ref())?;
        Ok(Self {
            details: fields.try_into()?,
            desktop: desktop_image(
                text(&form.image_source).as_deref(),
                text(&form.image_url),
                upload,
            )?,
            mobile: read_upload(form.mobile_image.as_ref())?,
            remove_mobile: flag(&form.remove_mobile_image),
        })
    }
}

/// Image-only slide added through `POST /api/slides`.
#[derive(MultipartForm)]
pub struct QuickSlideMultipartForm {
    pub slider_id: Option<Text<String>>,
    pub title: Option<Text<String>>,
    pub alt: Option<Text<String>>,
    pub image_source: Option<Text<String>>,
    pub image_url: Option<Text<String>>,
    #[multipart(limit = "10MiB")]
    pub desktop_image: Option<TempFile>,
    pub is_published: Option<Text<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickSlidePayload {
    pub slider_id: SliderId,
    pub title: String,
    pub alt: String,
    pub desktop: Option<DesktopImage>,
    pub is_published: bool,
}

impl QuickSlidePayload {
    /// The slide copies the desktop image as its mobile image and uses
    /// default presentation values.
    pub fn into_content(self, desktop_image_path: String) -> SlideContent {
        SlideContent {
            eyebrow: None,
            title: Some(self.title),
            description: None,
            cta_label: None,
            cta_url: None,
            mobile_image_path: Some(desktop_image_path.clone()),
            desktop_image_path,
            alt: self.alt,
            overlay_opacity: OverlayOpacity::default(),
            text_align: TextAlign::default(),
            text_color: HexColor::default(),
            button_variant: ButtonVariant::default(),
            is_published: self.is_published,
            publish_at: None,
            unpublish_at: None,
        }
    }
}

impl TryFrom<QuickSlideMultipartForm> for QuickSlidePayload {
    type Error = SlideFormError;

    fn try_from(form: QuickSlideMultipartForm) -> Result<Self, Self::Error> {
        let slider_id = text(&form.slider_id).ok_or(SlideFormError::MissingSlider)?;
        let slider_id = SliderId::new(
            slider_id
                .parse::<i32>()
                .map_err(|_| SlideFormError::MissingSlider)?,
        )?;
        let upload = read_upload(form.desktop_image.as_ref())?;
        Ok(Self {
            slider_id,
            title: text(&form.title).unwrap_or_else(|| QUICK_SLIDE_TITLE.to_string()),
            alt: text(&form.alt).unwrap_or_else(|| QUICK_SLIDE_ALT.to_string()),
            desktop: desktop_image(
                text(&form.image_source).as_deref(),
                text(&form.image_url),
                upload,
            )?,
            is_published: flag(&form.is_published),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SliderForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub is_active: Option<String>,
}

impl TryFrom<SliderForm> for NewSlider {
    type Error = SlideFormError;

    fn try_from(form: SliderForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = form.name.trim().to_string();
        let slug = match form.slug.trim() {
            "" => Slug::from_name(&name)?,
            slug => Slug::new(slug)?,
        };
        Ok(NewSlider {
            name: SliderName::new(name)?,
            slug,
            is_active: form.is_active.as_deref().is_some_and(is_truthy),
        })
    }
}

/// Settings form; unchecked checkboxes are absent from the body.
#[derive(Debug, Deserialize)]
pub struct SliderSettingsForm {
    pub autoplay_ms: Option<i32>,
    pub transition_ms: Option<i32>,
    pub loop_enabled: Option<String>,
    pub pause_on_hover: Option<String>,
    pub show_arrows: Option<String>,
    pub show_dots: Option<String>,
    pub show_progress: Option<String>,
}

impl TryFrom<SliderSettingsForm> for SliderSettings {
    type Error = SlideFormError;

    fn try_from(form: SliderSettingsForm) -> Result<Self, Self::Error> {
        let defaults = SliderSettings::default();
        let checked = |value: &Option<String>| value.as_deref().is_some_and(is_truthy);
        Ok(SliderSettings::new(
            form.autoplay_ms.unwrap_or(defaults.autoplay_ms),
            form.transition_ms.unwrap_or(defaults.transition_ms),
            checked(&form.loop_enabled),
            checked(&form.pause_on_hover),
            checked(&form.show_arrows),
            checked(&form.show_dots),
            checked(&form.show_progress),
        )?)
    }
}

/// Slide order posted by the drag-and-drop list: `ids=3,1,2`.
#[derive(Deserialize, Validate)]
pub struct SlideReorderForm {
    #[validate(length(min = 1))]
    pub ids: String,
}

impl TryFrom<SlideReorderForm> for Vec<SlideId> {
    type Error = SlideFormError;

    fn try_from(value: SlideReorderForm) -> Result<Self, Self::Error> {
        value.validate()?;
        parse_id_list(&value.ids)
            .map_err(SlideFormError::Validation)?
            .into_iter()
            .map(|id| SlideId::new(id).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> Upload {
        Upload {
            file_name: "hero.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![1],
        }
    }

    #[test]
    fn defaults_fill_presentation_fields() {
        let details = SlideDetails::try_from(SlideFields::default()).unwrap();
        assert_eq!(details.alt, "Slide");
        assert_eq!(details.overlay_opacity.get(), 0.35);
        assert_eq!(details.text_align, TextAlign::Left);
        assert_eq!(details.text_color.as_str(), "#FFFFFF");
        assert_eq!(details.button_variant, ButtonVariant::Primary);
        assert!(!details.is_published);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = |fields: SlideFields| SlideDetails::try_from(fields).is_err();
        assert!(bad(SlideFields {
            cta_url: Some("javascript:alert(1)".into()),
            ..SlideFields::default()
        }));
        assert!(bad(SlideFields {
            text_align: Some("justify".into()),
            ..SlideFields::default()
        }));
        assert!(bad(SlideFields {
            overlay_opacity: Some("1.5".into()),
            ..SlideFields::default()
        }));
        assert!(bad(SlideFields {
            text_color: Some("white".into()),
            ..SlideFields::default()
        }));
        assert!(bad(SlideFields {
            publish_at: Some("2025-05-02T10:00".into()),
            unpublish_at: Some("2025-05-01T10:00".into()),
            ..SlideFields::default()
        }));
    }

    #[test]
    fn site_paths_and_titles_are_accepted() {
        let details = SlideDetails::try_from(SlideFields {
            title: Some("Yaz Kampanyası".into()),
            cta_url: Some("/modeller".into()),
            publish_at: Some("2025-05-01T10:30".into()),
            ..SlideFields::default()
        })
        .unwrap();
        assert_eq!(details.alt, "Yaz Kampanyası");
        assert_eq!(details.cta_url.unwrap().as_str(), "/modeller");
        assert_eq!(
            details.publish_at.unwrap().format("%H:%M").to_string(),
            "10:30"
        );
    }

    #[test]
    fn url_mode_wins_over_upload() {
        let chosen = desktop_image(
            Some("url"),
            Some("https://cdn.example.com/a.jpg".into()),
            Some(upload()),
        )
        .unwrap();
        assert_eq!(
            chosen,
            Some(DesktopImage::External("https://cdn.example.com/a.jpg".into()))
        );
        assert_eq!(
            desktop_image(Some("upload"), None, Some(upload())).unwrap(),
            Some(DesktopImage::Upload(upload()))
        );
        assert_eq!(desktop_image(None, None, None).unwrap(), None);
        assert!(desktop_image(Some("url"), Some("ftp://x".into()), None).is_err());
    }

    #[test]
    fn quick_slide_mirrors_desktop_image() {
        let payload = QuickSlidePayload {
            slider_id: SliderId::new(1).unwrap(),
            title: QUICK_SLIDE_TITLE.into(),
            alt: QUICK_SLIDE_ALT.into(),
            desktop: None,
            is_published: true,
        };
        let content = payload.into_content("slides/1-a.jpg".into());
        assert_eq!(content.mobile_image_path.as_deref(), Some("slides/1-a.jpg"));
        assert_eq!(content.title.as_deref(), Some("Resim"));
        assert_eq!(content.alt, "Slider resmi");
    }

    #[test]
    fn settings_form_validates_ranges() {
        let form = |autoplay| SliderSettingsForm {
            autoplay_ms: Some(autoplay),
            transition_ms: None,
            loop_enabled: Some("on".into()),
            pause_on_hover: None,
            show_arrows: None,
            show_dots: Some("true".into()),
            show_progress: None,
        };
        let settings = SliderSettings::try_from(form(7000)).unwrap();
        assert_eq!(settings.transition_ms, 600);
        assert!(settings.loop_enabled);
        assert!(!settings.pause_on_hover);
        assert!(settings.show_dots);
        assert!(SliderSettings::try_from(form(500)).is_err());
    }
}
