use chrono::Utc;
use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductListQuery, ProductReader, ProductWriter};

fn filtered(
    query: &ProductListQuery,
) -> crate::schema::products::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    use crate::schema::products;

    let mut filtered = products::table.into_boxed();
    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        filtered = filtered.filter(
            products::name
                .like(pattern.clone())
                .or(products::brand.like(pattern.clone()))
                .or(products::description.like(pattern)),
        );
    }
    if let Some(brand) = &query.brand {
        filtered = filtered.filter(products::brand.eq(brand.clone()));
    }
    filtered
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(id.as_str())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::models::product::Product as DbProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut select = filtered(&query).order((products::brand.asc(), products::name.asc()));
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            select = select.limit(per_page).offset((page - 1) * per_page);
        }

        let items = select
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Product>>();

        Ok((total as usize, items))
    }
}

impl ProductWriter for DieselRepository {
    fn upsert_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize> {
        use crate::models::product::NewProduct as DbNewProduct;
        use crate::schema::products;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let mut affected = 0;
        for product in new_products {
            let row = DbNewProduct::from_domain(product, now);
            affected += diesel::insert_into(products::table)
                .values(&row)
                .on_conflict(products::id)
                .do_update()
                .set(&row)
                .execute(&mut conn)?;
        }

        Ok(affected)
    }
}
