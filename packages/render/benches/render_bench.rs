use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storeblocks_model::catalog;
use storeblocks_model::{BuilderElement, ElementType, Product};
use storeblocks_render::{
    render_canvas, render_storefront, to_html, CanvasState, HtmlOptions, RenderContext,
    StoreNavigator,
};

fn page(repeat: usize) -> Vec<BuilderElement> {
    (0..repeat)
        .flat_map(|round| {
            ElementType::ALL
                .into_iter()
                .map(move |element_type| {
                    catalog::instantiate(element_type, format!("{}-{}", element_type, round))
                })
        })
        .collect()
}

fn catalog_products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| Product {
            id: format!("p{}", i),
            name: format!("Product {}", i),
            price: 9.99 + i as f64,
            image: format!("/images/{}.jpg", i),
            slug: format!("product-{}", i),
            category: format!("Category {}", i % 6),
        })
        .collect()
}

fn canvas_every_type(c: &mut Criterion) {
    let elements = page(1);

    c.bench_function("canvas_every_type", |b| {
        b.iter(|| render_canvas(black_box(&elements), &CanvasState::default()))
    });
}

fn canvas_large_page(c: &mut Criterion) {
    let elements = page(20);
    let state = CanvasState {
        selected: Some("text-10"),
        ..CanvasState::default()
    };

    c.bench_function("canvas_large_page", |b| {
        b.iter(|| render_canvas(black_box(&elements), black_box(&state)))
    });
}

fn storefront_with_products(c: &mut Criterion) {
    let elements = page(5);
    let products = catalog_products(200);
    let navigator = StoreNavigator::new("/store", "bench");

    c.bench_function("storefront_with_products", |b| {
        b.iter(|| {
            let ctx = RenderContext::view("bench", &products, &navigator);
            render_storefront(black_box(&elements), &ctx)
        })
    });
}

fn storefront_to_html(c: &mut Criterion) {
    let elements = page(5);
    let products = catalog_products(50);
    let navigator = StoreNavigator::new("/store", "bench");
    let ctx = RenderContext::view("bench", &products, &navigator);
    let nodes = render_storefront(&elements, &ctx);

    c.bench_function("storefront_to_html_pretty", |b| {
        b.iter(|| to_html(black_box(&nodes), HtmlOptions::default()))
    });

    c.bench_function("storefront_to_html_compact", |b| {
        b.iter(|| to_html(black_box(&nodes), HtmlOptions::compact()))
    });
}

criterion_group!(
    benches,
    canvas_every_type,
    canvas_large_page,
    storefront_with_products,
    storefront_to_html
);
criterion_main!(benches);
