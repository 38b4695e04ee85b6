use crate::entity::{EntitySpec, FilterField, FilterKind, SortField};
use model::pagination::sort::SortKind;

const CREATED_AT: SortField = SortField {
    name: "createdAt",
    column: "created_at",
    kind: SortKind::Timestamp,
};

pub static PRODUCTS: EntitySpec = EntitySpec {
    name: "products",
    table: "products",
    pk: "id",
    default_sort: CREATED_AT,
    sortable: &[
        SortField {
            name: "price",
            column: "price",
            kind: SortKind::Decimal,
        },
        SortField {
            name: "stock",
            column: "stock",
            kind: SortKind::Int,
        },
        CREATED_AT,
    ],
    filterable: &[
        FilterField {
            name: "status",
            column: "status",
            kind: FilterKind::Text,
        },
        FilterField {
            name: "brandId",
            column: "brand_id",
            kind: FilterKind::Int,
        },
        FilterField {
            name: "categoryId",
            column: "category_id",
            kind: FilterKind::Int,
        },
    ],
    searchable: &["name", "sku"],
};
