use diesel::prelude::*;

use crate::domain::brand::{Brand, NewBrand};
use crate::domain::types::{BrandId, Slug};
use crate::models::brand::{Brand as DbBrand, NewBrand as DbNewBrand};
use crate::repository::{BrandReader, BrandWriter, DieselRepository, RepositoryResult};

impl BrandReader for DieselRepository {
    fn list_brands(&self, active_only: bool) -> RepositoryResult<Vec<Brand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let mut query = brands::table.into_boxed::<diesel::sqlite::Sqlite>();
        if active_only {
            query = query.filter(brands::is_active.eq(true));
        }

        let items = query
            .order(brands::name.asc())
            .load::<DbBrand>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Brand>, _>>()?;

        Ok(items)
    }

    fn get_brand_by_id(&self, id: BrandId) -> RepositoryResult<Option<Brand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let brand = brands::table
            .filter(brands::id.eq(id.get()))
            .first::<DbBrand>(&mut conn)
            .optional()?;

        Ok(brand.map(TryInto::try_into).transpose()?)
    }

    fn get_brand_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Brand>> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let brand = brands::table
            .filter(brands::slug.eq(slug.as_str()))
            .first::<DbBrand>(&mut conn)
            .optional()?;

        Ok(brand.map(TryInto::try_into).transpose()?)
    }

    fn count_brand_motorcycles(&self, id: BrandId) -> RepositoryResult<usize> {
        use crate::schema::motorcycles;

        let mut conn = self.conn()?;

        let total = motorcycles::table
            .filter(motorcycles::brand_id.eq(id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }
}

impl BrandWriter for DieselRepository {
    fn create_brand(&self, brand: &NewBrand) -> RepositoryResult<Brand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let db_brand = DbNewBrand::from(brand);

        let created = diesel::insert_into(brands::table)
            .values(&db_brand)
            .get_result::<DbBrand>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_brand(&self, id: BrandId, brand: &NewBrand) -> RepositoryResult<Brand> {
        use crate::schema::brands;

        let mut conn = self.conn()?;
        let db_brand = DbNewBrand::from(brand);

        let updated = diesel::update(brands::table.filter(brands::id.eq(id.get())))
            .set(&db_brand)
            .get_result::<DbBrand>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_brand(&self, id: BrandId) -> RepositoryResult<usize> {
        use crate::schema::brands;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(brands::table.filter(brands::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
