use diesel::prelude::*;

use crate::domain::motorcycle::{CatalogSort, Motorcycle, MotorcycleWithBrand, NewMotorcycle};
use crate::domain::types::{BrandName, MotorcycleId, Slug};
use crate::models::motorcycle::{Motorcycle as DbMotorcycle, NewMotorcycle as DbNewMotorcycle};
use crate::repository::{
    DieselRepository, MotorcycleListQuery, MotorcycleReader, MotorcycleWriter, RepositoryError,
    RepositoryResult,
};

fn with_brand(row: (DbMotorcycle, String, String)) -> RepositoryResult<MotorcycleWithBrand> {
    let (motorcycle, brand_name, brand_slug) = row;
    Ok(MotorcycleWithBrand {
        motorcycle: motorcycle.try_into()?,
        brand_name: BrandName::new(brand_name)?,
        brand_slug: Slug::new(brand_slug)?,
    })
}

impl MotorcycleReader for DieselRepository {
    fn list_motorcycles(
        &self,
        query: MotorcycleListQuery,
    ) -> RepositoryResult<(usize, Vec<MotorcycleWithBrand>)> {
        use crate::schema::{brands, motorcycle_categories, motorcycles};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = motorcycles::table
                .inner_join(brands::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if query.published_only {
                items = items.filter(motorcycles::is_published.eq(true));
            }
            if query.featured_only {
                items = items.filter(motorcycles::is_featured.eq(true));
            }
            if let Some(brand_id) = query.brand_id {
                items = items.filter(motorcycles::brand_id.eq(brand_id.get()));
            }
            if let Some(category_id) = query.category_id {
                items = items.filter(
                    motorcycles::id.eq_any(
                        motorcycle_categories::table
                            .filter(motorcycle_categories::category_id.eq(category_id.get()))
                            .select(motorcycle_categories::motorcycle_id),
                    ),
                );
            }
            if let Some(exclude) = query.exclude {
                items = items.filter(motorcycles::id.ne(exclude.get()));
            }
            if let Some(search) = query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                items = items.filter(motorcycles::name.like(format!("%{search}%")));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        items = match query.sort {
            CatalogSort::Name => {
                items.order((motorcycles::sort_order.asc(), motorcycles::name.asc()))
            }
            CatalogSort::PriceAsc => {
                items.order((motorcycles::base_price.asc(), motorcycles::name.asc()))
            }
            CatalogSort::PriceDesc => {
                items.order((motorcycles::base_price.desc(), motorcycles::name.asc()))
            }
            CatalogSort::Newest => {
                items.order((motorcycles::created_at.desc(), motorcycles::id.desc()))
            }
            CatalogSort::Featured => items.order((
                motorcycles::is_featured.desc(),
                motorcycles::sort_order.asc(),
                motorcycles::created_at.desc(),
                motorcycles::id.desc(),
            )),
            CatalogSort::FeaturedNewest => items.order((
                motorcycles::is_featured.desc(),
                motorcycles::created_at.desc(),
                motorcycles::id.desc(),
            )),
        };

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        } else if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let items = items
            .select((DbMotorcycle::as_select(), brands::name, brands::slug))
            .load::<(DbMotorcycle, String, String)>(&mut conn)?
            .into_iter()
            .map(with_brand)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, items))
    }

    fn get_motorcycle_by_id(&self, id: MotorcycleId) -> RepositoryResult<Option<Motorcycle>> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;

        let motorcycle = motorcycles::table
            .filter(motorcycles::id.eq(id.get()))
            .first::<DbMotorcycle>(&mut conn)
            .optional()?;

        Ok(motorcycle.map(TryInto::try_into).transpose()?)
    }

    fn get_motorcycle_by_slug(
        &self,
        slug: &Slug,
    ) -> RepositoryResult<Option<MotorcycleWithBrand>> {
        use crate::schema::{brands, motorcycles};

        let mut conn = self.conn()?;

        let row = motorcycles::table
            .inner_join(brands::table)
            .filter(motorcycles::slug.eq(slug.as_str()))
            .select((DbMotorcycle::as_select(), brands::name, brands::slug))
            .first::<(DbMotorcycle, String, String)>(&mut conn)
            .optional()?;

        row.map(with_brand).transpose()
    }

    fn motorcycle_slug_taken(
        &self,
        slug: &Slug,
        exclude: Option<MotorcycleId>,
    ) -> RepositoryResult<bool> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;

        let mut query = motorcycles::table
            .filter(motorcycles::slug.eq(slug.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(id) = exclude {
            query = query.filter(motorcycles::id.ne(id.get()));
        }

        let count = query.count().get_result::<i64>(&mut conn)?;
        Ok(count > 0)
    }
}

impl MotorcycleWriter for DieselRepository {
    fn create_motorcycle(&self, motorcycle: &NewMotorcycle) -> RepositoryResult<Motorcycle> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;
        let row = DbNewMotorcycle::try_from(motorcycle)?;

        let created = diesel::insert_into(motorcycles::table)
            .values(&row)
            .get_result::<DbMotorcycle>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_motorcycle(
        &self,
        id: MotorcycleId,
        motorcycle: &NewMotorcycle,
    ) -> RepositoryResult<Motorcycle> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;
        let row = DbNewMotorcycle::try_from(motorcycle)?;

        let updated = diesel::update(motorcycles::table.filter(motorcycles::id.eq(id.get())))
            .set(&row)
            .get_result::<DbMotorcycle>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_motorcycle(&self, id: MotorcycleId) -> RepositoryResult<usize> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;

        let affected = diesel::delete(motorcycles::table.filter(motorcycles::id.eq(id.get())))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(affected)
    }

    fn set_motorcycle_published(&self, id: MotorcycleId, value: bool) -> RepositoryResult<usize> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;

        let affected = diesel::update(motorcycles::table.filter(motorcycles::id.eq(id.get())))
            .set((
                motorcycles::is_published.eq(value),
                motorcycles::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_motorcycle_featured(&self, id: MotorcycleId, value: bool) -> RepositoryResult<usize> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;

        let affected = diesel::update(motorcycles::table.filter(motorcycles::id.eq(id.get())))
            .set((
                motorcycles::is_featured.eq(value),
                motorcycles::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
