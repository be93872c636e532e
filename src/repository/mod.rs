use crate::db::{DbConnection, DbPool};
use crate::domain::brand::{Brand, NewBrand};
use crate::domain::category::{Category, NewCategory};
use crate::domain::content::{ContactSettings, Faq, FooterLinks, NewFaq, PrefooterBanner};
use crate::domain::lead::{
    CreditApplication, LeadListItem, NewCreditApplication, NewTestDriveRequest, TestDriveRequest,
};
use crate::domain::motorcycle::{
    CatalogSort, Motorcycle, MotorcycleImage, MotorcycleWithBrand, NewMotorcycle,
    NewMotorcycleImage, NewSpecItem, SpecItem,
};
use crate::domain::slider::{NewSlider, Slide, SlideContent, Slider, SliderSettings};
use crate::domain::types::{
    BrandId, CategoryId, FaqId, MotorcycleId, MotorcycleImageId, SlideId, SliderId, Slug,
};
use crate::pagination::Pagination;

pub use errors::{RepositoryError, RepositoryResult};

pub mod brand;
pub mod category;
pub mod content;
pub mod errors;
pub mod lead;
pub mod motorcycle;
pub mod motorcycle_image;
pub mod slider;
pub mod spec_item;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing motorcycles.
#[derive(Debug, Clone, Default)]
pub struct MotorcycleListQuery {
    /// Only rows with `is_published = true`.
    pub published_only: bool,
    /// Only rows with `is_featured = true`.
    pub featured_only: bool,
    pub brand_id: Option<BrandId>,
    pub category_id: Option<CategoryId>,
    /// Exclude a single motorcycle, used for "related" lists.
    pub exclude: Option<MotorcycleId>,
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    pub sort: CatalogSort,
    pub limit: Option<usize>,
    pub pagination: Option<Pagination>,
}

impl MotorcycleListQuery {
    /// Query for storefront reads.
    pub fn published() -> Self {
        Self {
            published_only: true,
            ..Self::default()
        }
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn brand(mut self, brand_id: BrandId) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn exclude(mut self, id: MotorcycleId) -> Self {
        self.exclude = Some(id);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort: CatalogSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for brand entities.
pub trait BrandReader {
    /// List brands ordered by name.
    fn list_brands(&self, active_only: bool) -> RepositoryResult<Vec<Brand>>;
    fn get_brand_by_id(&self, id: BrandId) -> RepositoryResult<Option<Brand>>;
    fn get_brand_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Brand>>;
    /// Number of motorcycles referencing the brand.
    fn count_brand_motorcycles(&self, id: BrandId) -> RepositoryResult<usize>;
}

/// Write operations for brand entities.
pub trait BrandWriter {
    fn create_brand(&self, brand: &NewBrand) -> RepositoryResult<Brand>;
    fn update_brand(&self, id: BrandId, brand: &NewBrand) -> RepositoryResult<Brand>;
    fn delete_brand(&self, id: BrandId) -> RepositoryResult<usize>;
}

/// Read-only operations for catalog categories.
pub trait CategoryReader {
    /// List categories by `sort_order`, then name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>>;
    fn list_motorcycle_categories(
        &self,
        motorcycle_id: MotorcycleId,
    ) -> RepositoryResult<Vec<Category>>;
}

/// Write operations for catalog categories.
pub trait CategoryWriter {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
    /// Replace the category set of a motorcycle.
    fn set_motorcycle_categories(
        &self,
        motorcycle_id: MotorcycleId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for motorcycles.
pub trait MotorcycleReader {
    /// List motorcycles with their brand, returning the total before limits.
    fn list_motorcycles(
        &self,
        query: MotorcycleListQuery,
    ) -> RepositoryResult<(usize, Vec<MotorcycleWithBrand>)>;
    fn get_motorcycle_by_id(&self, id: MotorcycleId) -> RepositoryResult<Option<Motorcycle>>;
    fn get_motorcycle_by_slug(&self, slug: &Slug)
    -> RepositoryResult<Option<MotorcycleWithBrand>>;
    /// Whether another motorcycle already uses `slug`.
    fn motorcycle_slug_taken(
        &self,
        slug: &Slug,
        exclude: Option<MotorcycleId>,
    ) -> RepositoryResult<bool>;
}

/// Write operations for motorcycles.
pub trait MotorcycleWriter {
    fn create_motorcycle(&self, motorcycle: &NewMotorcycle) -> RepositoryResult<Motorcycle>;
    fn update_motorcycle(
        &self,
        id: MotorcycleId,
        motorcycle: &NewMotorcycle,
    ) -> RepositoryResult<Motorcycle>;
    /// Delete the row; images, spec items and category links cascade.
    fn delete_motorcycle(&self, id: MotorcycleId) -> RepositoryResult<usize>;
    fn set_motorcycle_published(&self, id: MotorcycleId, value: bool) -> RepositoryResult<usize>;
    fn set_motorcycle_featured(&self, id: MotorcycleId, value: bool) -> RepositoryResult<usize>;
}

/// Read-only operations for gallery images.
pub trait MotorcycleImageReader {
    /// Images of a motorcycle by `sort_order`.
    fn list_motorcycle_images(
        &self,
        motorcycle_id: MotorcycleId,
    ) -> RepositoryResult<Vec<MotorcycleImage>>;
    fn get_motorcycle_image(
        &self,
        id: MotorcycleImageId,
    ) -> RepositoryResult<Option<MotorcycleImage>>;
}

/// Write operations for gallery images.
pub trait MotorcycleImageWriter {
    /// Append an image at the end of the gallery; a primary image demotes the
    /// previous primary in the same transaction.
    fn add_motorcycle_image(&self, image: &NewMotorcycleImage)
    -> RepositoryResult<MotorcycleImage>;
    fn set_primary_image(
        &self,
        motorcycle_id: MotorcycleId,
        image_id: MotorcycleImageId,
    ) -> RepositoryResult<usize>;
    /// Assign `sort_order = index` following `ids`; every id must belong to the motorcycle.
    fn reorder_motorcycle_images(
        &self,
        motorcycle_id: MotorcycleId,
        ids: &[MotorcycleImageId],
    ) -> RepositoryResult<usize>;
    fn delete_motorcycle_image(&self, id: MotorcycleImageId) -> RepositoryResult<usize>;
}

/// Read-only operations for spec sheet rows.
pub trait SpecItemReader {
    /// Rows in the order they were entered.
    fn list_spec_items(&self, motorcycle_id: MotorcycleId) -> RepositoryResult<Vec<SpecItem>>;
}

pub trait SpecItemWriter {
    /// Delete every row of the motorcycle and insert `items` in order.
    fn replace_spec_items(
        &self,
        motorcycle_id: MotorcycleId,
        items: &[NewSpecItem],
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for sliders, slides and their settings.
pub trait SliderReader {
    fn list_sliders(&self) -> RepositoryResult<Vec<Slider>>;
    fn get_slider_by_id(&self, id: SliderId) -> RepositoryResult<Option<Slider>>;
    fn get_slider_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Slider>>;
    /// Slides of a slider ordered by `sort_order`.
    fn list_slides(&self, slider_id: SliderId) -> RepositoryResult<Vec<Slide>>;
    fn get_slide_by_id(&self, id: SlideId) -> RepositoryResult<Option<Slide>>;
    fn get_slider_settings(&self, slider_id: SliderId)
    -> RepositoryResult<Option<SliderSettings>>;
}

/// Write operations for sliders, slides and their settings.
pub trait SliderWriter {
    fn create_slider(&self, slider: &NewSlider) -> RepositoryResult<Slider>;
    /// Insert a slide at `max(sort_order) + 1` inside one transaction.
    fn create_slide(&self, slider_id: SliderId, content: &SlideContent) -> RepositoryResult<Slide>;
    fn update_slide(&self, id: SlideId, content: &SlideContent) -> RepositoryResult<Slide>;
    fn delete_slide(&self, id: SlideId) -> RepositoryResult<usize>;
    /// Assign dense `1..=n` positions following `ids`.
    fn reorder_slides(&self, slider_id: SliderId, ids: &[SlideId]) -> RepositoryResult<usize>;
    fn upsert_slider_settings(
        &self,
        slider_id: SliderId,
        settings: &SliderSettings,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for site content singletons and FAQ entries.
pub trait ContentReader {
    fn get_contact_settings(&self) -> RepositoryResult<Option<ContactSettings>>;
    /// FAQ entries by `sort_order`.
    fn list_faqs(&self, published_only: bool) -> RepositoryResult<Vec<Faq>>;
    fn get_faq(&self, id: FaqId) -> RepositoryResult<Option<Faq>>;
    fn get_footer_links(&self) -> RepositoryResult<Option<FooterLinks>>;
    fn get_prefooter_banner(&self) -> RepositoryResult<Option<PrefooterBanner>>;
}

/// Write operations for site content.
pub trait ContentWriter {
    fn save_contact_settings(&self, settings: &ContactSettings) -> RepositoryResult<usize>;
    fn create_faq(&self, faq: &NewFaq) -> RepositoryResult<Faq>;
    fn update_faq(&self, id: FaqId, faq: &NewFaq) -> RepositoryResult<Faq>;
    fn delete_faq(&self, id: FaqId) -> RepositoryResult<usize>;
    fn save_footer_links(&self, links: &FooterLinks) -> RepositoryResult<usize>;
    fn save_prefooter_banner(&self, banner: &PrefooterBanner) -> RepositoryResult<usize>;
}

/// Read-only operations for lead submissions, newest first.
pub trait LeadReader {
    fn list_credit_applications(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<LeadListItem<CreditApplication>>)>;
    fn list_test_drive_requests(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<LeadListItem<TestDriveRequest>>)>;
}

pub trait LeadWriter {
    fn create_credit_application(
        &self,
        application: &NewCreditApplication,
    ) -> RepositoryResult<CreditApplication>;
    fn create_test_drive_request(
        &self,
        request: &NewTestDriveRequest,
    ) -> RepositoryResult<TestDriveRequest>;
}
