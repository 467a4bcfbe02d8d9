use listing_core::{
    render_card, short_description, CardView, Listing, FALLBACK_HOST_IMAGE, FALLBACK_IMAGE,
};

fn parse(json: &str) -> Listing {
    serde_json::from_str(json).expect("valid listing json")
}

#[test]
fn seven_amenities_render_six_badges_and_one_more() {
    let listing = parse(
        r#"{"id": 7, "name": "Loft", "price": "$100",
            "amenities": ["WiFi","Pool","Gym","AC","TV","Parking","Balcony"]}"#,
    );
    let card = CardView::new(&listing, false);
    assert_eq!(card.amenities, vec!["WiFi", "Pool", "Gym", "AC", "TV", "Parking"]);
    assert_eq!(card.more_amenities, 1);

    let html = card.to_html();
    assert_eq!(html.matches(r#"<span class="badge"#).count(), 7);
    assert!(html.contains("+1 more"));
    assert!(!html.contains("Balcony"));
}

#[test]
fn six_or_fewer_amenities_have_no_more_badge() {
    let listing = parse(r#"{"amenities": ["A","B","C","D","E","F"]}"#);
    let html = render_card(&listing, false);
    assert_eq!(html.matches(r#"<span class="badge"#).count(), 6);
    assert!(!html.contains("more</span>"));
}

#[test]
fn missing_fields_use_fallback_literals() {
    let card = CardView::new(&parse("{}"), false);
    assert_eq!(card.title, "Untitled");
    assert_eq!(card.price, "N/A");
    assert_eq!(card.host_name, "Unknown host");
    assert_eq!(card.thumbnail, FALLBACK_IMAGE);
    assert_eq!(card.host_photo, FALLBACK_HOST_IMAGE);
    assert_eq!(card.link, None);
}

#[test]
fn missing_description_placeholder_in_summary_and_details() {
    let html = render_card(&parse(r#"{"id": 1, "name": "Loft"}"#), false);
    assert!(html.contains("<summary>No description provided.</summary>"));
    assert!(html.contains(r#"<div class="small mt-2">No description provided.</div>"#));
}

#[test]
fn image_selection_prefers_first_non_empty() {
    let listing = parse(
        r#"{"thumbnail_url": "", "picture_url": "https://img/p.jpg",
            "host_thumbnail_url": "https://img/h.jpg", "host_picture_url": "https://img/hp.jpg"}"#,
    );
    let card = CardView::new(&listing, false);
    assert_eq!(card.thumbnail, "https://img/p.jpg");
    assert_eq!(card.host_photo, "https://img/h.jpg");
}

#[test]
fn long_descriptions_are_truncated_in_summary_only() {
    let text = format!("{}\nsecond line", "é".repeat(200));
    let listing = Listing {
        description: Some(text.clone()),
        ..Listing::default()
    };
    let card = CardView::new(&listing, false);
    let summary = card.summary();
    assert!(summary.ends_with("..."));
    assert_eq!(summary.chars().count(), 163);

    let html = card.to_html();
    assert!(html.contains("<br>second line"));

    assert_eq!(short_description("short", 160), "short");
    assert_eq!(short_description(&"x".repeat(160), 160), "x".repeat(160));
}

#[test]
fn script_in_name_is_neutralized_everywhere() {
    let listing = parse(
        r#"{"id": "\"><script>alert(1)</script>", "name": "<script>alert('x')</script>",
            "host_name": "<img src=x onerror=alert(1)>", "description": "<script>bad()</script>",
            "amenities": ["<b>Pool</b>"]}"#,
    );
    let html = render_card(&listing, true);
    assert!(!html.contains("<script"));
    assert!(!html.contains("<img src=x"));
    assert!(!html.contains("<b>Pool"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains(r#"data-preview-title="&lt;script&gt;alert('x')&lt;/script&gt;""#));
    assert!(html.contains(r#"data-id="&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;""#));
}

#[test]
fn missing_link_renders_disabled_action() {
    let html = render_card(&parse(r#"{"id": 1}"#), false);
    assert!(html.contains("No link available"));
    assert!(html.contains("disabled"));
    assert!(html.contains(r##"href="#""##));

    let html = render_card(&parse(r#"{"id": 1, "listing_url": "https://example.com/rooms/1"}"#), false);
    assert!(html.contains(r#"href="https://example.com/rooms/1""#));
    assert!(html.contains("Open listing"));
    assert!(!html.contains("disabled"));
}

#[test]
fn favorite_state_changes_button() {
    let listing = parse(r#"{"id": 5}"#);
    assert!(render_card(&listing, true).contains("btn-danger favBtn"));
    assert!(render_card(&listing, true).contains('♥'));
    assert!(render_card(&listing, false).contains("btn-outline-danger favBtn"));
    assert!(render_card(&listing, false).contains('♡'));
}

#[test]
fn thumbnail_carries_preview_data() {
    let listing = parse(
        r#"{"id": 3, "name": "Loft", "price": "$90", "host_name": "Ana", "thumbnail_url": "https://img/t.jpg"}"#,
    );
    let card = CardView::new(&listing, false);
    let preview = card.preview();
    assert_eq!(preview.src.as_deref(), Some("https://img/t.jpg"));
    assert_eq!(preview.title.as_deref(), Some("Loft"));
    assert_eq!(preview.caption.as_deref(), Some("$90 • Host: Ana"));

    let html = card.to_html();
    assert!(html.contains(r#"data-preview-src="https://img/t.jpg""#));
    assert!(html.contains(r#"data-preview-caption="$90 • Host: Ana""#));
}
