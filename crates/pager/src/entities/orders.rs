use crate::entity::{EntitySpec, FilterField, FilterKind, SortField};
use model::pagination::sort::SortKind;

const CREATED_AT: SortField = SortField {
    name: "createdAt",
    column: "created_at",
    kind: SortKind::Timestamp,
};

pub static ORDERS: EntitySpec = EntitySpec {
    name: "orders",
    table: "orders",
    pk: "id",
    default_sort: CREATED_AT,
    sortable: &[
        SortField {
            name: "total",
            column: "total",
            kind: SortKind::Decimal,
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
            name: "paymentStatus",
            column: "payment_status",
            kind: FilterKind::Text,
        },
        FilterField {
            name: "customerId",
            column: "customer_id",
            kind: FilterKind::Int,
        },
    ],
    searchable: &["customer_name", "customer_email"],
};
