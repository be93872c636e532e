use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::slider::{NewSlider, Slide, SlideContent, Slider, SliderSettings};
use crate::domain::types::{SlideId, SliderId, Slug};
use crate::models::slider::{
    NewSlider as DbNewSlider, Slide as DbSlide, SlideChanges, Slider as DbSlider,
    SliderSettings as DbSliderSettings,
};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, SliderReader, SliderWriter,
};

impl SliderReader for DieselRepository {
    fn list_sliders(&self) -> RepositoryResult<Vec<Slider>> {
        use crate::schema::sliders;

        let mut conn = self.conn()?;

        let items = sliders::table
            .order(sliders::name.asc())
            .load::<DbSlider>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Slider>, _>>()?;

        Ok(items)
    }

    fn get_slider_by_id(&self, id: SliderId) -> RepositoryResult<Option<Slider>> {
        use crate::schema::sliders;

        let mut conn = self.conn()?;

        let slider = sliders::table
            .filter(sliders::id.eq(id.get()))
            .first::<DbSlider>(&mut conn)
            .optional()?;

        Ok(slider.map(TryInto::try_into).transpose()?)
    }

    fn get_slider_by_slug(&self, slug: &Slug) -> RepositoryResult<Option<Slider>> {
        use crate::schema::sliders;

        let mut conn = self.conn()?;

        let slider = sliders::table
            .filter(sliders::slug.eq(slug.as_str()))
            .first::<DbSlider>(&mut conn)
            .optional()?;

        Ok(slider.map(TryInto::try_into).transpose()?)
    }

    fn list_slides(&self, slider_id: SliderId) -> RepositoryResult<Vec<Slide>> {
        use crate::schema::slides;

        let mut conn = self.conn()?;

        let items = slides::table
            .filter(slides::slider_id.eq(slider_id.get()))
            .order((slides::sort_order.asc(), slides::id.asc()))
            .load::<DbSlide>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Slide>, _>>()?;

        Ok(items)
    }

    fn get_slide_by_id(&self, id: SlideId) -> RepositoryResult<Option<Slide>> {
        use crate::schema::slides;

        let mut conn = self.conn()?;

        let slide = slides::table
            .filter(slides::id.eq(id.get()))
            .first::<DbSlide>(&mut conn)
            .optional()?;

        Ok(slide.map(TryInto::try_into).transpose()?)
    }

    fn get_slider_settings(
        &self,
        slider_id: SliderId,
    ) -> RepositoryResult<Option<SliderSettings>> {
        use crate::schema::slider_settings;

        let mut conn = self.conn()?;

        let settings = slider_settings::table
            .filter(slider_settings::slider_id.eq(slider_id.get()))
            .first::<DbSliderSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(TryInto::try_into).transpose()?)
    }
}

impl SliderWriter for DieselRepository {
    fn create_slider(&self, slider: &NewSlider) -> RepositoryResult<Slider> {
        use crate::schema::sliders;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(sliders::table)
            .values(DbNewSlider::from(slider))
            .get_result::<DbSlider>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn create_slide(&self, slider_id: SliderId, content: &SlideContent) -> RepositoryResult<Slide> {
        use crate::schema::slides;

        let mut conn = self.conn()?;
        let changes = SlideChanges::from(content);

        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            let max_order = slides::table
                .filter(slides::slider_id.eq(slider_id.get()))
                .select(diesel::dsl::max(slides::sort_order))
                .first::<Option<i32>>(conn)?;

            Ok(diesel::insert_into(slides::table)
                .values((
                    &changes,
                    slides::slider_id.eq(slider_id.get()),
                    slides::sort_order.eq(max_order.unwrap_or(0) + 1),
                ))
                .get_result::<DbSlide>(conn)?)
        })?;

        Ok(created.try_into()?)
    }

    fn update_slide(&self, id: SlideId, content: &SlideContent) -> RepositoryResult<Slide> {
        use crate::schema::slides;

        let mut conn = self.conn()?;

        let updated = diesel::update(slides::table.filter(slides::id.eq(id.get())))
            .set(SlideChanges::from(content))
            .get_result::<DbSlide>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_slide(&self, id: SlideId) -> RepositoryResult<usize> {
        use crate::schema::slides;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(slides::table.filter(slides::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }

    fn reorder_slides(&self, slider_id: SliderId, ids: &[SlideId]) -> RepositoryResult<usize> {
        use crate::schema::slides;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let existing: HashSet<i32> = slides::table
                .filter(slides::slider_id.eq(slider_id.get()))
                .select(slides::id)
                .load::<i32>(conn)?
                .into_iter()
                .collect();

            let requested: HashSet<i32> = ids.iter().map(|id| id.get()).collect();
            if requested.len() != ids.len() || requested != existing {
                return Err(RepositoryError::ValidationError(
                    "slide order must list every slide of the slider exactly once".to_string(),
                ));
            }

            let mut affected = 0;
            for (index, id) in ids.iter().enumerate() {
                affected += diesel::update(slides::table.filter(slides::id.eq(id.get())))
                    .set((
                        slides::sort_order.eq(index as i32 + 1),
                        slides::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)?;
            }
            Ok(affected)
        })
    }

    fn upsert_slider_settings(
        &self,
        slider_id: SliderId,
        settings: &SliderSettings,
    ) -> RepositoryResult<usize> {
        use crate::schema::slider_settings;

        let mut conn = self.conn()?;
        let row = DbSliderSettings::from_domain(slider_id.get(), settings);

        let affected = diesel::insert_into(slider_settings::table)
            .values(&row)
            .on_conflict(slider_settings::slider_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
