use super::repository::{Category, ServiceItem};
use itertools::Itertools;
use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTree {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub services: Vec<ServiceItem>,
}

/// Nests items under their category, keeping the category order.
pub fn build_tree(categories: Vec<Category>, items: Vec<ServiceItem>) -> Vec<CategoryTree> {
    let mut items_by_category = items.into_iter().into_group_map_by(|item| item.category_id);

    categories
        .into_iter()
        .map(|category| CategoryTree {
            services: items_by_category.remove(&category.id).unwrap_or_default(),
            id: category.id,
            name: category.name,
            icon: category.icon,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use bigdecimal::BigDecimal;

    fn category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            icon: String::new(),
            services_count: 0,
        }
    }

    fn item(id: i32, category_id: i32, name: &str) -> ServiceItem {
        ServiceItem {
            id,
            category_id,
            name: name.to_string(),
            icon: String::new(),
            description: String::new(),
            base_price: BigDecimal::from(100),
        }
    }

    #[test]
    fn nests_items_under_their_category() {
        let tree = build_tree(
            vec![category(1, "Plomberie"), category(2, "Ménage"), category(3, "Vide")],
            vec![
                item(10, 1, "Débouchage"),
                item(11, 2, "Ménage à domicile"),
                item(12, 1, "Réparation de fuite"),
            ],
        );

        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree[0].services.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![10, 12]
        );
        assert_eq!(tree[1].services[0].name, "Ménage à domicile");
        assert!(tree[2].services.is_empty());
    }

    #[test]
    fn orphan_items_are_left_out() {
        let tree = build_tree(vec![category(1, "Plomberie")], vec![item(10, 9, "Orphan")]);
        assert!(tree[0].services.is_empty());
    }
}
