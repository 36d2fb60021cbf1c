use criterion::{black_box, criterion_group, criterion_main, Criterion};
use umber_css3::tokenize_str;

const STYLESHEET: &str = r#"
html, body { margin: 0; padding: 0; font: 16px/1.5 "Inter", sans-serif; }
.container { max-width: 72rem; margin: 0 auto; }
.nav > li:not(.active)::after { content: "\2022"; color: #88c0d0; }
@media (max-width: 640px) {
    .container { width: 100%; padding: 0 1.25em; }
    .hero { background: url( ../img/hero@2x.png ) center / cover no-repeat; }
}
@keyframes pulse { from { opacity: 0.4; } to { opacity: 1; } }
"#;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("tokenization", |b| {
        b.iter(|| tokenize_str(black_box(STYLESHEET)).expect("tokenization failed"))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
