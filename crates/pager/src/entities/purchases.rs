use crate::entity::{EntitySpec, FilterField, FilterKind, SortField};
use model::pagination::sort::SortKind;

const CREATED_AT: SortField = SortField {
    name: "createdAt",
    column: "created_at",
    kind: SortKind::Timestamp,
};

pub static PURCHASES: EntitySpec = EntitySpec {
    name: "purchases",
    table: "purchases",
    pk: "id",
    default_sort: CREATED_AT,
    sortable: &[
        SortField {
            name: "quantityPurchased",
            column: "quantity_purchased",
            kind: SortKind::Int,
        },
        SortField {
            name: "unitCost",
            column: "unit_cost",
            kind: SortKind::Decimal,
        },
        CREATED_AT,
    ],
    filterable: &[
        FilterField {
            name: "productId",
            column: "product_id",
            kind: FilterKind::Int,
        },
        FilterField {
            name: "supplierId",
            column: "supplier_id",
            kind: FilterKind::Int,
        },
    ],
    searchable: &["supplier_name", "reference"],
};
