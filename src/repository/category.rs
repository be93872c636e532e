use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, MotorcycleId, Slug};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, NewMotorcycleCategory,
};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, RepositoryResult};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }

    fn get_category_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }

    fn list_motorcycle_categories(
        &self,
        motorcycle_id: MotorcycleId,
    ) -> RepositoryResult<Vec<Category>> {
        use crate::schema::{categories, motorcycle_categories};

        let mut conn = self.conn()?;

        let items = categories::table
            .inner_join(motorcycle_categories::table)
            .filter(motorcycle_categories::motorcycle_id.eq(motorcycle_id.get()))
            .order((categories::sort_order.asc(), categories::name.asc()))
            .select(DbCategory::as_select())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(categories::table)
            .values(DbNewCategory::from(category))
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(categories::table.filter(categories::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_motorcycle_categories(
        &self,
        motorcycle_id: MotorcycleId,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<usize> {
        use crate::schema::motorcycle_categories;

        let mut conn = self.conn()?;

        let mut unique_ids: Vec<i32> = category_ids.iter().map(|id| id.get()).collect();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let rows: Vec<NewMotorcycleCategory> = unique_ids
            .into_iter()
            .map(|category_id| NewMotorcycleCategory {
                motorcycle_id: motorcycle_id.get(),
                category_id,
            })
            .collect();

        let affected = conn.transaction(|conn| {
            diesel::delete(
                motorcycle_categories::table
                    .filter(motorcycle_categories::motorcycle_id.eq(motorcycle_id.get())),
            )
            .execute(conn)?;

            if rows.is_empty() {
                return Ok(0);
            }

            diesel::insert_into(motorcycle_categories::table)
                .values(&rows)
                .execute(conn)
        })?;

        Ok(affected)
    }
}
