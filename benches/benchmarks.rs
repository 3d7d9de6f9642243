//! Benchmarks for the geometry and interaction core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use page_flip::{
    detect, BezierCache, Book, BookOptions, Capabilities, Corner, CornerSet, CubicBezier,
    DisplayMode, FlipOptions, FlipSession, Fold, Point, RecordingSurface, RegionId,
    RenderSurface, Size,
};

const SIZE: Size = Size {
    width: 800.0,
    height: 600.0,
};

fn book(pages: u32, display: DisplayMode) -> Book<RecordingSurface> {
    let mut surface = RecordingSurface::new(Capabilities::new(true));
    let container = surface.add_root(SIZE);
    let contents: Vec<RegionId> = (0..pages)
        .map(|_| surface.create_region(container))
        .collect();
    let options = BookOptions {
        display,
        ..BookOptions::default()
    };
    Book::with_pages(surface, container, options, contents).unwrap()
}

fn bench_detect(c: &mut Criterion) {
    c.bench_function("detect_corner", |b| {
        b.iter(|| {
            black_box(detect(
                black_box(Point::new(790.0, 590.0)),
                SIZE,
                100.0,
                CornerSet::ALL,
            ))
        });
    });
}

fn bench_fold(c: &mut Criterion) {
    c.bench_function("page_relative_fold_transform", |b| {
        b.iter(|| {
            let fold = Fold::page_relative(
                Some(Corner::BottomRight),
                black_box(Point::new(790.0, 590.0)),
                black_box(Point::new(500.0, 420.0)),
                SIZE,
            );
            black_box(fold.transform(true).to_css())
        });
    });
}

fn bench_bezier(c: &mut Criterion) {
    let curve = CubicBezier::new(
        Point::new(800.0, 0.0),
        Point::new(600.0, 150.0),
        Point::new(200.0, 150.0),
        Point::new(0.0, 0.0),
    );

    c.bench_function("bezier_sample_cold", |b| {
        b.iter(|| {
            let mut cache = BezierCache::default();
            black_box(cache.sample(&curve, 60))
        });
    });

    c.bench_function("bezier_sample_warm", |b| {
        let mut cache = BezierCache::default();
        cache.sample(&curve, 60);
        b.iter(|| black_box(cache.sample(&curve, 60)));
    });
}

fn bench_flip_drag(c: &mut Criterion) {
    c.bench_function("flip_drag_cycle", |b| {
        let mut surface = RecordingSurface::new(Capabilities::new(true));
        let container = surface.add_root(SIZE);
        let mut flip = FlipSession::new(surface, container, FlipOptions::default()).unwrap();

        b.iter(|| {
            flip.start(Point::new(790.0, 10.0));
            for i in 0..20 {
                flip.move_to(Point::new(790.0 - i as f32 * 30.0, 10.0 + i as f32 * 5.0));
            }
            flip.end();
            flip.surface_mut().take_patches();
        });
    });
}

fn bench_book_drag(c: &mut Criterion) {
    c.bench_function("book_drag_cycle", |b| {
        let mut book = book(100, DisplayMode::Double);
        book.set_page(49).unwrap();

        b.iter(|| {
            book.start_flip(Corner::TopRight);
            for i in 0..20 {
                book.update_flip(Point::new(790.0 - i as f32 * 4.0, 10.0));
            }
            book.complete_flip();
            book.surface_mut().take_patches();
        });
    });
}

fn bench_navigation(c: &mut Criterion) {
    c.bench_function("book_next_previous", |b| {
        let mut book = book(100, DisplayMode::Single);

        b.iter(|| {
            if !book.next() {
                book.set_page(1).unwrap();
            }
            book.surface_mut().take_patches();
        });
    });
}

criterion_group!(
    benches,
    bench_detect,
    bench_fold,
    bench_bezier,
    bench_flip_drag,
    bench_book_drag,
    bench_navigation,
);

criterion_main!(benches);
