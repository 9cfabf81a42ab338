use super::*;

// =========================================================
// 辅助函数
// =========================================================

fn sample_line_item(thumbnail: &str) -> RawOrderLineItem {
    RawOrderLineItem {
        id: 1,
        product: RawProductSnapshot {
            id: 10,
            name: "Running Shoe".to_string(),
            price: 59.9,
            thumbnail: thumbnail.to_string(),
        },
        price: 59.9,
        number_of_products: 2,
        total_money: 119.8,
    }
}

fn sample_raw() -> RawOrderDetail {
    RawOrderDetail {
        id: 42,
        user_id: 5,
        fullname: "Nguyen Van A".to_string(),
        phone_number: "0123456789".to_string(),
        email: "a@example.com".to_string(),
        address: "1 Main St".to_string(),
        note: String::new(),
        order_date: Some(vec![2023, 11, 5]),
        shipping_date: Some(vec![2023, 11, 9]),
        status: "pending".to_string(),
        total_money: 119.8,
        shipping_method: "express".to_string(),
        shipping_address: "1 Main St".to_string(),
        payment_method: "cod".to_string(),
        order_details: vec![sample_line_item("shoe1.png")],
    }
}

// =========================================================
// 日期重建测试
// =========================================================

#[test]
fn test_assemble_reconstructs_dates_exactly() {
    let detail = assemble_order_detail(sample_raw(), "https://api.example.com").unwrap();

    // [2023, 11, 5] 就是 2023-11-05，逐分量对应，无时区偏移
    assert_eq!(detail.order_date, NaiveDate::from_ymd_opt(2023, 11, 5).unwrap());
    assert_eq!(detail.shipping_date, NaiveDate::from_ymd_opt(2023, 11, 9).unwrap());
}

#[test]
fn test_missing_order_date_is_fatal() {
    let mut raw = sample_raw();
    raw.order_date = None;

    let err = assemble_order_detail(raw, "https://api.example.com").unwrap_err();
    assert_eq!(err, AssembleError::MissingDate { field: "order_date" });
}

#[test]
fn test_wrong_length_shipping_date_is_fatal() {
    let mut raw = sample_raw();
    raw.shipping_date = Some(vec![2023, 11]);

    let err = assemble_order_detail(raw, "https://api.example.com").unwrap_err();
    assert_eq!(
        err,
        AssembleError::InvalidDate {
            field: "shipping_date",
            parts: vec![2023, 11],
        }
    );
}

#[test]
fn test_out_of_range_date_is_fatal() {
    let mut raw = sample_raw();
    raw.order_date = Some(vec![2023, 13, 40]);

    let err = assemble_order_detail(raw, "https://api.example.com").unwrap_err();
    assert!(matches!(err, AssembleError::InvalidDate { field: "order_date", .. }));
}

#[test]
fn test_negative_date_component_is_fatal() {
    let mut raw = sample_raw();
    raw.order_date = Some(vec![2023, -1, 5]);

    let err = assemble_order_detail(raw, "https://api.example.com").unwrap_err();
    assert!(matches!(err, AssembleError::InvalidDate { field: "order_date", .. }));
}

// =========================================================
// 缩略图改写测试
// =========================================================

#[test]
fn test_assemble_rewrites_thumbnails_to_absolute_urls() {
    let detail = assemble_order_detail(sample_raw(), "https://api.example.com").unwrap();

    assert_eq!(
        detail.order_details[0].product.thumbnail,
        "https://api.example.com/products/images/shoe1.png"
    );
}

#[test]
fn test_image_url_trims_trailing_slash() {
    assert_eq!(
        image_url("https://api.example.com/", "shoe1.png"),
        "https://api.example.com/products/images/shoe1.png"
    );
}

#[test]
fn test_assemble_preserves_line_item_order() {
    let mut raw = sample_raw();
    raw.order_details = vec![sample_line_item("a.png"), sample_line_item("b.png")];

    let detail = assemble_order_detail(raw, "https://api.example.com").unwrap();
    assert_eq!(detail.order_details.len(), 2);
    assert!(detail.order_details[0].product.thumbnail.ends_with("/a.png"));
    assert!(detail.order_details[1].product.thumbnail.ends_with("/b.png"));
}

// =========================================================
// 传输结构反序列化测试
// =========================================================

#[test]
fn test_raw_order_detail_deserializes_from_transport_json() {
    let json = r#"{
        "id": 42,
        "user_id": 5,
        "fullname": "Nguyen Van A",
        "phone_number": "0123456789",
        "email": "a@example.com",
        "address": "1 Main St",
        "note": "",
        "order_date": [2023, 11, 5],
        "shipping_date": [2023, 11, 9],
        "status": "pending",
        "total_money": 119.8,
        "shipping_method": "express",
        "shipping_address": "1 Main St",
        "payment_method": "cod",
        "order_details": [
            {
                "id": 1,
                "product": {"id": 10, "name": "Running Shoe", "price": 59.9, "thumbnail": "shoe1.png"},
                "price": 59.9,
                "number_of_products": 2,
                "total_money": 119.8
            }
        ]
    }"#;

    let raw: RawOrderDetail = serde_json::from_str(json).unwrap();
    assert_eq!(raw.order_date, Some(vec![2023, 11, 5]));
    assert_eq!(raw.order_details[0].product.thumbnail, "shoe1.png");
}

#[test]
fn test_order_list_response_reads_camel_case_total_pages() {
    let json = r#"{"orders": [], "totalPages": 3}"#;
    let list: OrderListResponse = serde_json::from_str(json).unwrap();
    assert_eq!(list.total_pages, 3);
    assert!(list.orders.is_empty());
}
