use crate::domain::models::product::Product as DomainProduct;
use shared::Product;

pub struct ProductMapper;

impl ProductMapper {
    pub fn to_dto(domain: &DomainProduct) -> Product {
        Product {
            id: domain.id.clone(),
            name: domain.name.clone(),
            category: domain.category.clone(),
            price: domain.price,
            image: domain.image.clone(),
            description: domain.description.clone(),
            daily_revenue: domain.daily_revenue,
            withdrawal_period: domain.withdrawal_period,
        }
    }

    pub fn to_dto_list<'a, I>(products: I) -> Vec<Product>
    where
        I: IntoIterator<Item = &'a DomainProduct>,
    {
        products.into_iter().map(Self::to_dto).collect()
    }
}
