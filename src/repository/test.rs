use std::cell::RefCell;
use std::collections::HashSet;

use chrono::{NaiveDateTime, Utc};

use crate::domain::brand::{Brand, NewBrand};
use crate::domain::category::{Category, NewCategory};
use crate::domain::content::{ContactSettings, Faq, FooterLinks, NewFaq, PrefooterBanner};
use crate::domain::lead::{
    CreditApplication, LeadListItem, LeadMotorcycle, NewCreditApplication, NewTestDriveRequest,
    TestDriveRequest,
};
use crate::domain::motorcycle::{
    CatalogSort, Motorcycle, MotorcycleImage, MotorcycleWithBrand, NewMotorcycle,
    NewMotorcycleImage, NewSpecItem, SpecItem,
};
use crate::domain::slider::{NewSlider, Slide, SlideContent, Slider, SliderSettings};
use crate::domain::types::{
    BrandId, CategoryId, FaqId, LeadId, MotorcycleId, MotorcycleImageId, SlideId, SliderId, Slug,
    SortOrder, SpecItemId,
};
use crate::pagination::Pagination;
use crate::repository::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, ContentReader, ContentWriter,
    LeadReader, LeadWriter, MotorcycleImageReader, MotorcycleImageWriter, MotorcycleListQuery,
    MotorcycleReader, MotorcycleWriter, RepositoryError, RepositoryResult, SliderReader,
    SliderWriter, SpecItemReader, SpecItemWriter,
};

#[derive(Default)]
struct State {
    next_id: i32,
    brands: Vec<Brand>,
    categories: Vec<Category>,
    motorcycle_categories: Vec<(MotorcycleId, CategoryId)>,
    motorcycles: Vec<Motorcycle>,
    images: Vec<MotorcycleImage>,
    spec_items: Vec<SpecItem>,
    sliders: Vec<Slider>,
    slides: Vec<Slide>,
    settings: Vec<(SliderId, SliderSettings)>,
    contact: Option<ContactSettings>,
    faqs: Vec<Faq>,
    footer: Option<FooterLinks>,
    banner: Option<PrefooterBanner>,
    credit_applications: Vec<CreditApplication>,
    test_drives: Vec<TestDriveRequest>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory repository used for unit tests.
///
/// Reads named in `failing` return a database error, which lets tests
/// exercise partial-failure handling.
#[derive(Default)]
pub struct TestRepository {
    state: RefCell<State>,
    failing: RefCell<HashSet<&'static str>>,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn slug(value: &str) -> Slug {
    Slug::new(value).unwrap()
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named read operation fail from now on.
    pub fn fail(&self, operation: &'static str) {
        self.failing.borrow_mut().insert(operation);
    }

    fn check(&self, operation: &'static str) -> RepositoryResult<()> {
        if self.failing.borrow().contains(operation) {
            Err(RepositoryError::Database(
                diesel::result::Error::BrokenTransactionManager,
            ))
        } else {
            Ok(())
        }
    }

    /// Seed a brand and return it.
    pub fn add_brand(&self, name: &str, brand_slug: &str) -> Brand {
        self.create_brand(&NewBrand {
            name: name.try_into().unwrap(),
            slug: slug(brand_slug),
            logo_path: None,
            is_active: true,
        })
        .unwrap()
    }

    /// Seed a published motorcycle.
    pub fn add_motorcycle(&self, brand: &Brand, name: &str, moto_slug: &str, price: f64) -> Motorcycle {
        self.create_motorcycle(&NewMotorcycle {
            brand_id: brand.id,
            name: name.try_into().unwrap(),
            slug: slug(moto_slug),
            subtitle: None,
            description: None,
            base_price: price.try_into().unwrap(),
            currency: Default::default(),
            stock_status: Default::default(),
            is_published: true,
            is_featured: false,
            is_new: false,
            badges: Vec::new(),
            hero_image_path: None,
            sort_order: SortOrder::default(),
        })
        .unwrap()
    }

    /// Seed a slider.
    pub fn add_slider(&self, name: &str, slider_slug: &str) -> Slider {
        self.create_slider(&NewSlider {
            name: name.try_into().unwrap(),
            slug: slug(slider_slug),
            is_active: true,
        })
        .unwrap()
    }

    pub fn image_count(&self) -> usize {
        self.state.borrow().images.len()
    }

    pub fn slide_count(&self) -> usize {
        self.state.borrow().slides.len()
    }

    fn brand_of(&self, motorcycle: &Motorcycle) -> RepositoryResult<MotorcycleWithBrand> {
        let state = self.state.borrow();
        let brand = state
            .brands
            .iter()
            .find(|b| b.id == motorcycle.brand_id)
            .ok_or_else(|| RepositoryError::ForeignKey("brand".into()))?;
        Ok(MotorcycleWithBrand {
            motorcycle: motorcycle.clone(),
            brand_name: brand.name.clone(),
            brand_slug: brand.slug.clone(),
        })
    }
}

impl BrandReader for TestRepository {
    fn list_brands(&self, active_only: bool) -> RepositoryResult<Vec<Brand>> {
        self.check("list_brands")?;
        let mut items: Vec<Brand> = self
            .state
            .borrow()
            .brands
            .iter()
            .filter(|b| !active_only || b.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn get_brand_by_id(&self, id: BrandId) -> RepositoryResult<Option<Brand>> {
        Ok(self.state.borrow().brands.iter().find(|b| b.id == id).cloned())
    }

    fn get_brand_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Brand>> {
        Ok(self
            .state
            .borrow()
            .brands
            .iter()
            .find(|b| &b.slug == slug)
            .cloned())
    }

    fn count_brand_motorcycles(&self, id: BrandId) -> RepositoryResult<usize> {
        Ok(self
            .state
            .borrow()
            .motorcycles
            .iter()
            .filter(|m| m.brand_id == id)
            .count())
    }
}

impl BrandWriter for TestRepository {
    fn create_brand(&self, brand: &NewBrand) -> RepositoryResult<Brand> {
        let mut state = self.state.borrow_mut();
        if state.brands.iter().any(|b| b.slug == brand.slug) {
            return Err(RepositoryError::Conflict("brands.slug".into()));
        }
        let id = state.next_id();
        let created = Brand {
            id: BrandId::new(id)?,
            name: brand.name.clone(),
            slug: brand.slug.clone(),
            logo_path: brand.logo_path.clone(),
            is_active: brand.is_active,
            created_at: now(),
            updated_at: now(),
        };
        state.brands.push(created.clone());
        Ok(created)
    }

    fn update_brand(&self, id: BrandId, brand: &NewBrand) -> RepositoryResult<Brand> {
        let mut state = self.state.borrow_mut();
        if state
            .brands
            .iter()
            .any(|b| b.slug == brand.slug && b.id != id)
        {
            return Err(RepositoryError::Conflict("brands.slug".into()));
        }
        let existing = state
            .brands
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.name = brand.name.clone();
        existing.slug = brand.slug.clone();
        existing.logo_path = brand.logo_path.clone();
        existing.is_active = brand.is_active;
        existing.updated_at = now();
        Ok(existing.clone())
    }

    fn delete_brand(&self, id: BrandId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        if state.motorcycles.iter().any(|m| m.brand_id == id) {
            return Err(RepositoryError::ForeignKey("motorcycles.brand_id".into()));
        }
        let before = state.brands.len();
        state.brands.retain(|b| b.id != id);
        Ok(before - state.brands.len())
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.check("list_categories")?;
        let mut items = self.state.borrow().categories.clone();
        items.sort_by_key(|c| c.sort_order);
        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .state
            .borrow()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>> {
        Ok(self
            .state
            .borrow()
            .categories
            .iter()
            .find(|c| &c.slug == slug)
            .cloned())
    }

    fn list_motorcycle_categories(
        &self,
        motorcycle_id: MotorcycleId,
    ) -> RepositoryResult<Vec<Category>> {
        let state = self.state.borrow();
        Ok(state
            .categories
            .iter()
            .filter(|c| state.motorcycle_categories.contains(&(motorcycle_id, c.id)))
            .cloned()
            .collect())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.state.borrow_mut();
        if state.categories.iter().any(|c| c.slug == category.slug) {
            return Err(RepositoryError::Conflict("categories.slug".into()));
        }
        let id = state.next_id();
        let created = Category {
            id: CategoryId::new(id)?,
            name: category.name.clone(),
            slug: category.slug.clone(),
            sort_order: category.sort_order,
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        state.motorcycle_categories.retain(|(_, c)| *c != id);
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(before - state.categories.len())
    }

    fn set_motorcycle_categories(
        &self,
        motorcycle_id: MotorcycleId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        state.motorcycle_categories.retain(|(m, _)| *m != motorcycle_id);
        for id in category_ids {
            if !state.motorcycle_categories.contains(&(motorcycle_id, *id)) {
                state.motorcycle_categories.push((motorcycle_id, *id));
            }
        }
        Ok(category_ids.len())
    }
}

impl MotorcycleReader for TestRepository {
    fn list_motorcycles(
        &self,
        query: MotorcycleListQuery,
    ) -> RepositoryResult<(usize, Vec<MotorcycleWithBrand>)> {
        self.check("list_motorcycles")?;
        let mut items: Vec<Motorcycle> = {
            let state = self.state.borrow();
            state
                .motorcycles
                .iter()
                .filter(|m| !query.published_only || m.is_published)
                .filter(|m| !query.featured_only || m.is_featured)
                .filter(|m| query.brand_id.is_none_or(|b| m.brand_id == b))
                .filter(|m| {
                    query
                        .category_id
                        .is_none_or(|c| state.motorcycle_categories.contains(&(m.id, c)))
                })
                .filter(|m| query.exclude.is_none_or(|id| m.id != id))
                .filter(|m| {
                    query.search.as_deref().is_none_or(|needle| {
                        m.name.to_lowercase().contains(&needle.to_lowercase())
                    })
                })
                .cloned()
                .collect()
        };
        match query.sort {
            CatalogSort::Name => items.sort_by(|a, b| {
                a.sort_order
                    .cmp(&b.sort_order)
                    .then_with(|| a.name.cmp(&b.name))
            }),
            CatalogSort::PriceAsc => {
                items.sort_by(|a, b| a.base_price.get().total_cmp(&b.base_price.get()))
            }
            CatalogSort::PriceDesc => {
                items.sort_by(|a, b| b.base_price.get().total_cmp(&a.base_price.get()))
            }
            CatalogSort::Newest => items.sort_by(|a, b| b.id.cmp(&a.id)),
            CatalogSort::Featured => items.sort_by(|a, b| {
                b.is_featured
                    .cmp(&a.is_featured)
                    .then_with(|| a.sort_order.cmp(&b.sort_order))
                    .then_with(|| b.id.cmp(&a.id))
            }),
            CatalogSort::FeaturedNewest => items.sort_by(|a, b| {
                b.is_featured
                    .cmp(&a.is_featured)
                    .then_with(|| b.created_at.cmp(&a.created_at))
                    .then_with(|| b.id.cmp(&a.id))
            }),
        }
        let total = items.len();
        if let Some(pagination) = query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset() as usize)
                .take(pagination.per_page)
                .collect();
        } else if let Some(limit) = query.limit {
            items.truncate(limit);
        }
        let items = items
            .iter()
            .map(|m| self.brand_of(m))
            .collect::<RepositoryResult<Vec<_>>>()?;
        Ok((total, items))
    }

    fn get_motorcycle_by_id(&self, id: MotorcycleId) -> RepositoryResult<Option<Motorcycle>> {
        Ok(self
            .state
            .borrow()
            .motorcycles
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    fn get_motorcycle_by_slug(
        &self,
        slug: &Slug,
    ) -> RepositoryResult<Option<MotorcycleWithBrand>> {
        self.check("get_motorcycle_by_slug")?;
        let found = self
            .state
            .borrow()
            .motorcycles
            .iter()
            .find(|m| &m.slug == slug)
            .cloned();
        found.map(|m| self.brand_of(&m)).transpose()
    }

    fn motorcycle_slug_taken(
        &self,
        slug: &Slug,
        exclude: Option<MotorcycleId>,
    ) -> RepositoryResult<bool> {
        Ok(self
            .state
            .borrow()
            .motorcycles
            .iter()
            .any(|m| &m.slug == slug && Some(m.id) != exclude))
    }
}

impl MotorcycleWriter for TestRepository {
    fn create_motorcycle(&self, motorcycle: &NewMotorcycle) -> RepositoryResult<Motorcycle> {
        self.check("create_motorcycle")?;
        let mut state = self.state.borrow_mut();
        if state.motorcycles.iter().any(|m| m.slug == motorcycle.slug) {
            return Err(RepositoryError::Conflict("motorcycles.slug".into()));
        }
        if !state.brands.iter().any(|b| b.id == motorcycle.brand_id) {
            return Err(RepositoryError::ForeignKey("motorcycles.brand_id".into()));
        }
        let id = state.next_id();
        let created = Motorcycle {
            id: MotorcycleId::new(id)?,
            brand_id: motorcycle.brand_id,
            name: motorcycle.name.clone(),
            slug: motorcycle.slug.clone(),
            subtitle: motorcycle.subtitle.clone(),
            description: motorcycle.description.clone(),
            base_price: motorcycle.base_price,
            currency: motorcycle.currency.clone(),
            stock_status: motorcycle.stock_status,
            is_published: motorcycle.is_published,
            is_featured: motorcycle.is_featured,
            is_new: motorcycle.is_new,
            badges: motorcycle.badges.clone(),
            hero_image_path: motorcycle.hero_image_path.clone(),
            sort_order: motorcycle.sort_order,
            created_at: now(),
            updated_at: now(),
        };
        state.motorcycles.push(created.clone());
        Ok(created)
    }

    fn update_motorcycle(
        &self,
        id: MotorcycleId,
        motorcycle: &NewMotorcycle,
    ) -> RepositoryResult<Motorcycle> {
        self.check("update_motorcycle")?;
        let mut state = self.state.borrow_mut();
        if state
            .motorcycles
            .iter()
            .any(|m| m.slug == motorcycle.slug && m.id != id)
        {
            return Err(RepositoryError::Conflict("motorcycles.slug".into()));
        }
        let existing = state
            .motorcycles
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.brand_id = motorcycle.brand_id;
        existing.name = motorcycle.name.clone();
        existing.slug = motorcycle.slug.clone();
        existing.subtitle = motorcycle.subtitle.clone();
        existing.description = motorcycle.description.clone();
        existing.base_price = motorcycle.base_price;
        existing.currency = motorcycle.currency.clone();
        existing.stock_status = motorcycle.stock_status;
        existing.is_published = motorcycle.is_published;
        existing.is_featured = motorcycle.is_featured;
        existing.is_new = motorcycle.is_new;
        existing.badges = motorcycle.badges.clone();
        existing.hero_image_path = motorcycle.hero_image_path.clone();
        existing.sort_order = motorcycle.sort_order;
        existing.updated_at = now();
        Ok(existing.clone())
    }

    fn delete_motorcycle(&self, id: MotorcycleId) -> RepositoryResult<usize> {
        self.check("delete_motorcycle")?;
        let mut state = self.state.borrow_mut();
        let before = state.motorcycles.len();
        state.motorcycles.retain(|m| m.id != id);
        if before == state.motorcycles.len() {
            return Err(RepositoryError::NotFound);
        }
        state.images.retain(|i| i.motorcycle_id != id);
        state.spec_items.retain(|s| s.motorcycle_id != id);
        state.motorcycle_categories.retain(|(m, _)| *m != id);
        Ok(1)
    }

    fn set_motorcycle_published(&self, id: MotorcycleId, value: bool) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        Ok(state
            .motorcycles
            .iter_mut()
            .filter(|m| m.id == id)
            .map(|m| m.is_published = value)
            .count())
    }

    fn set_motorcycle_featured(&self, id: MotorcycleId, value: bool) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        Ok(state
            .motorcycles
            .iter_mut()
            .filter(|m| m.id == id)
            .map(|m| m.is_featured = value)
            .count())
    }
}

impl MotorcycleImageReader for TestRepository {
    fn list_motorcycle_images(
        &self,
        motorcycle_id: MotorcycleId,
    ) -> RepositoryResult<Vec<MotorcycleImage>> {
        self.check("list_motorcycle_images")?;
        let mut items: Vec<MotorcycleImage> = self
            .state
            .borrow()
            .images
            .iter()
            .filter(|i| i.motorcycle_id == motorcycle_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| (i.sort_order, i.id));
        Ok(items)
    }

    fn get_motorcycle_image(
        &self,
        id: MotorcycleImageId,
    ) -> RepositoryResult<Option<MotorcycleImage>> {
        Ok(self.state.borrow().images.iter().find(|i| i.id == id).cloned())
    }
}

impl MotorcycleImageWriter for TestRepository {
    fn add_motorcycle_image(
        &self,
        image: &NewMotorcycleImage,
    ) -> RepositoryResult<MotorcycleImage> {
        self.check("add_motorcycle_image")?;
        let mut state = self.state.borrow_mut();
        if image.is_primary {
            for existing in state
                .images
                .iter_mut()
                .filter(|i| i.motorcycle_id == image.motorcycle_id)
            {
                existing.is_primary = false;
            }
        }
        let next_order = state
            .images
            .iter()
            .filter(|i| i.motorcycle_id == image.motorcycle_id)
            .map(|i| i.sort_order.get() + 1)
            .max()
            .unwrap_or(0);
        let id = state.next_id();
        let created = MotorcycleImage {
            id: MotorcycleImageId::new(id)?,
            motorcycle_id: image.motorcycle_id,
            path: image.path.clone(),
            alt: image.alt.clone(),
            sort_order: SortOrder::new(next_order)?,
            is_primary: image.is_primary,
        };
        state.images.push(created.clone());
        Ok(created)
    }

    fn set_primary_image(
        &self,
        motorcycle_id: MotorcycleId,
        image_id: MotorcycleImageId,
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        if !state
            .images
            .iter()
            .any(|i| i.id == image_id && i.motorcycle_id == motorcycle_id)
        {
            return Err(RepositoryError::NotFound);
        }
        for image in state
            .images
            .iter_mut()
            .filter(|i| i.motorcycle_id == motorcycle_id)
        {
            image.is_primary = image.id == image_id;
        }
        Ok(1)
    }

    fn reorder_motorcycle_images(
        &self,
        motorcycle_id: MotorcycleId,
        ids: &[MotorcycleImageId],
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let existing: HashSet<MotorcycleImageId> = state
            .images
            .iter()
            .filter(|i| i.motorcycle_id == motorcycle_id)
            .map(|i| i.id)
            .collect();
        let requested: HashSet<MotorcycleImageId> = ids.iter().copied().collect();
        if requested.len() != ids.len() || requested != existing {
            return Err(RepositoryError::ValidationError("image order".into()));
        }
        for (index, id) in ids.iter().enumerate() {
            if let Some(image) = state.images.iter_mut().find(|i| i.id == *id) {
                image.sort_order = SortOrder::new(index as i32)?;
            }
        }
        Ok(ids.len())
    }

    fn delete_motorcycle_image(&self, id: MotorcycleImageId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.images.len();
        state.images.retain(|i| i.id != id);
        Ok(before - state.images.len())
    }
}

impl SpecItemReader for TestRepository {
    fn list_spec_items(&self, motorcycle_id: MotorcycleId) -> RepositoryResult<Vec<SpecItem>> {
        self.check("list_spec_items")?;
        let mut items: Vec<SpecItem> = self
            .state
            .borrow()
            .spec_items
            .iter()
            .filter(|s| s.motorcycle_id == motorcycle_id)
            .cloned()
            .collect();
        items.sort_by_key(|s| (s.sort_order, s.id));
        Ok(items)
    }
}

impl SpecItemWriter for TestRepository {
    fn replace_spec_items(
        &self,
        motorcycle_id: MotorcycleId,
        items: &[NewSpecItem],
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        state.spec_items.retain(|s| s.motorcycle_id != motorcycle_id);
        for (index, item) in items.iter().enumerate() {
            let id = state.next_id();
            state.spec_items.push(SpecItem {
                id: SpecItemId::new(id)?,
                motorcycle_id,
                group: item.group.clone(),
                key: item.key.clone(),
                value: item.value.clone(),
                sort_order: SortOrder::new(index as i32)?,
            });
        }
        Ok(items.len())
    }
}

impl SliderReader for TestRepository {
    fn list_sliders(&self) -> RepositoryResult<Vec<Slider>> {
        Ok(self.state.borrow().sliders.clone())
    }

    fn get_slider_by_id(&self, id: SliderId) -> RepositoryResult<Option<Slider>> {
        Ok(self.state.borrow().sliders.iter().find(|s| s.id == id).cloned())
    }

    fn get_slider_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Slider>> {
        self.check("get_slider_by_slug")?;
        Ok(self
            .state
            .borrow()
            .sliders
            .iter()
            .find(|s| &s.slug == slug)
            .cloned())
    }

    fn list_slides(&self, slider_id: SliderId) -> RepositoryResult<Vec<Slide>> {
        let mut items: Vec<Slide> = self
            .state
            .borrow()
            .slides
            .iter()
            .filter(|s| s.slider_id == slider_id)
            .cloned()
            .collect();
        items.sort_by_key(|s| (s.sort_order, s.id));
        Ok(items)
    }

    fn get_slide_by_id(&self, id: SlideId) -> RepositoryResult<Option<Slide>> {
        Ok(self.state.borrow().slides.iter().find(|s| s.id == id).cloned())
    }

    fn get_slider_settings(
        &self,
        slider_id: SliderId,
    ) -> RepositoryResult<Option<SliderSettings>> {
        Ok(self
            .state
            .borrow()
            .settings
            .iter()
            .find(|(id, _)| *id == slider_id)
            .map(|(_, settings)| *settings))
    }
}

impl SliderWriter for TestRepository {
    fn create_slider(&self, slider: &NewSlider) -> RepositoryResult<Slider> {
        let mut state = self.state.borrow_mut();
        if state.sliders.iter().any(|s| s.slug == slider.slug) {
            return Err(RepositoryError::Conflict("sliders.slug".into()));
        }
        let id = state.next_id();
        let created = Slider {
            id: SliderId::new(id)?,
            name: slider.name.clone(),
            slug: slider.slug.clone(),
            is_active: slider.is_active,
            created_at: now(),
            updated_at: now(),
        };
        state.sliders.push(created.clone());
        Ok(created)
    }

    fn create_slide(&self, slider_id: SliderId, content: &SlideContent) -> RepositoryResult<Slide> {
        self.check("create_slide")?;
        let mut state = self.state.borrow_mut();
        let next_order = state
            .slides
            .iter()
            .filter(|s| s.slider_id == slider_id)
            .map(|s| s.sort_order.get())
            .max()
            .unwrap_or(0)
            + 1;
        let id = state.next_id();
        let created = Slide {
            id: SlideId::new(id)?,
            slider_id,
            content: content.clone(),
            sort_order: SortOrder::new(next_order)?,
            created_at: now(),
            updated_at: now(),
        };
        state.slides.push(created.clone());
        Ok(created)
    }

    fn update_slide(&self, id: SlideId, content: &SlideContent) -> RepositoryResult<Slide> {
        self.check("update_slide")?;
        let mut state = self.state.borrow_mut();
        let existing = state
            .slides
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.content = content.clone();
        existing.updated_at = now();
        Ok(existing.clone())
    }

    fn delete_slide(&self, id: SlideId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.slides.len();
        state.slides.retain(|s| s.id != id);
        Ok(before - state.slides.len())
    }

    fn reorder_slides(&self, slider_id: SliderId, ids: &[SlideId]) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let existing: HashSet<SlideId> = state
            .slides
            .iter()
            .filter(|s| s.slider_id == slider_id)
            .map(|s| s.id)
            .collect();
        let requested: HashSet<SlideId> = ids.iter().copied().collect();
        if requested.len() != ids.len() || requested != existing {
            return Err(RepositoryError::ValidationError("slide order".into()));
        }
        for (index, id) in ids.iter().enumerate() {
            if let Some(slide) = state.slides.iter_mut().find(|s| s.id == *id) {
                slide.sort_order = SortOrder::new(index as i32 + 1)?;
            }
        }
        Ok(ids.len())
    }

    fn upsert_slider_settings(
        &self,
        slider_id: SliderId,
        settings: &SliderSettings,
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        state.settings.retain(|(id, _)| *id != slider_id);
        state.settings.push((slider_id, *settings));
        Ok(1)
    }
}

impl ContentReader for TestRepository {
    fn get_contact_settings(&self) -> RepositoryResult<Option<ContactSettings>> {
        Ok(self.state.borrow().contact.clone())
    }

    fn list_faqs(&self, published_only: bool) -> RepositoryResult<Vec<Faq>> {
        let mut items: Vec<Faq> = self
            .state
            .borrow()
            .faqs
            .iter()
            .filter(|f| !published_only || f.is_published)
            .cloned()
            .collect();
        items.sort_by_key(|f| (f.sort_order, f.id));
        Ok(items)
    }

    fn get_faq(&self, id: FaqId) -> RepositoryResult<Option<Faq>> {
        Ok(self.state.borrow().faqs.iter().find(|f| f.id == id).cloned())
    }

    fn get_footer_links(&self) -> RepositoryResult<Option<FooterLinks>> {
        Ok(self.state.borrow().footer.clone())
    }

    fn get_prefooter_banner(&self) -> RepositoryResult<Option<PrefooterBanner>> {
        Ok(self.state.borrow().banner.clone())
    }
}

impl ContentWriter for TestRepository {
    fn save_contact_settings(&self, settings: &ContactSettings) -> RepositoryResult<usize> {
        self.state.borrow_mut().contact = Some(settings.clone());
        Ok(1)
    }

    fn create_faq(&self, faq: &NewFaq) -> RepositoryResult<Faq> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let created = Faq {
            id: FaqId::new(id)?,
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            sort_order: faq.sort_order,
            is_published: faq.is_published,
        };
        state.faqs.push(created.clone());
        Ok(created)
    }

    fn update_faq(&self, id: FaqId, faq: &NewFaq) -> RepositoryResult<Faq> {
        let mut state = self.state.borrow_mut();
        let existing = state
            .faqs
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.question = faq.question.clone();
        existing.answer = faq.answer.clone();
        existing.sort_order = faq.sort_order;
        existing.is_published = faq.is_published;
        Ok(existing.clone())
    }

    fn delete_faq(&self, id: FaqId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.faqs.len();
        state.faqs.retain(|f| f.id != id);
        Ok(before - state.faqs.len())
    }

    fn save_footer_links(&self, links: &FooterLinks) -> RepositoryResult<usize> {
        self.state.borrow_mut().footer = Some(links.clone());
        Ok(1)
    }

    fn save_prefooter_banner(&self, banner: &PrefooterBanner) -> RepositoryResult<usize> {
        self.state.borrow_mut().banner = Some(banner.clone());
        Ok(1)
    }
}

impl TestRepository {
    fn lead_motorcycle(&self, id: Option<MotorcycleId>) -> Option<LeadMotorcycle> {
        let state = self.state.borrow();
        id.and_then(|id| state.motorcycles.iter().find(|m| m.id == id))
            .map(|m| LeadMotorcycle {
                name: m.name.as_str().to_string(),
                slug: m.slug.as_str().to_string(),
            })
    }
}

impl LeadReader for TestRepository {
    fn list_credit_applications(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<LeadListItem<CreditApplication>>)> {
        let mut items = self.state.borrow().credit_applications.clone();
        items.reverse();
        let total = items.len();
        let items = items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.per_page)
            .map(|lead| LeadListItem {
                motorcycle: self.lead_motorcycle(lead.motorcycle_id),
                lead,
            })
            .collect();
        Ok((total, items))
    }

    fn list_test_drive_requests(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<LeadListItem<TestDriveRequest>>)> {
        let mut items = self.state.borrow().test_drives.clone();
        items.reverse();
        let total = items.len();
        let items = items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.per_page)
            .map(|lead| LeadListItem {
                motorcycle: self.lead_motorcycle(lead.motorcycle_id),
                lead,
            })
            .collect();
        Ok((total, items))
    }
}

impl LeadWriter for TestRepository {
    fn create_credit_application(
        &self,
        application: &NewCreditApplication,
    ) -> RepositoryResult<CreditApplication> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let created = CreditApplication {
            id: LeadId::new(id)?,
            full_name: application.full_name.clone(),
            phone: application.phone.clone(),
            income_range: application.income_range.clone(),
            motorcycle_id: application.motorcycle_id,
            created_at: now(),
            processed: false,
        };
        state.credit_applications.push(created.clone());
        Ok(created)
    }

    fn create_test_drive_request(
        &self,
        request: &NewTestDriveRequest,
    ) -> RepositoryResult<TestDriveRequest> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let created = TestDriveRequest {
            id: LeadId::new(id)?,
            full_name: request.full_name.clone(),
            phone: request.phone.clone(),
            motorcycle_id: request.motorcycle_id,
            preferred_date: request.preferred_date,
            note: request.note.clone(),
            created_at: now(),
            processed: false,
        };
        state.test_drives.push(created.clone());
        Ok(created)
    }
}
