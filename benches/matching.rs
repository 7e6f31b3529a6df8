use criterion::{criterion_group, criterion_main, Criterion};
use routeforge::manifest::{Manifest, ManifestFormat};
use routeforge::template::Compiler;
use std::hint::black_box;

fn example_manifest() -> &'static str {
    r#"
[[routes]]
url = "/"
to = "Home::index"
name = "home"

[[routes]]
url = "/zoo/animals"
to = "Animals::index"

[[routes]]
url = "/zoo/animals/(id:digit)"
to = "Animals::show/{id}"
name = "animal"

[[routes]]
url = "/zoo/animals/(id:digit)/toys/(toy:alnum:1,16)"
to = "Toys::show/{id}/{toy}"

[[routes]]
url = "/zoo/(category:lower)/animals/(id:digit)/habitats/(h:digit)/sections/(s:digit)"
to = "Habitats::section/{category}/{id}/{h}/{s}"

[[routes]]
url = "/archive/(y:year)/(m:month)/(d:day)"
to = "Blog::archive/{y}/{m}/{d}"
name = "archive"

[[routes]]
url = "/entity/(id:uuid)"
to = "Entities::show/{id}"
"#
}

fn bench_compile(c: &mut Criterion) {
    let compiler = Compiler::default();
    c.bench_function("template_compile", |b| {
        b.iter(|| {
            let route = compiler.compile(black_box(
                "/zoo/(category:lower)/animals/(id:digit)/habitats/(h:digit:1,4)",
            ));
            black_box(&route);
        })
    });
}

fn bench_route_match(c: &mut Criterion) {
    let router = Manifest::parse(example_manifest(), ManifestFormat::Toml)
        .and_then(|m| m.build_router())
        .expect("failed to build router");
    c.bench_function("route_match", |b| {
        let test_paths = [
            "/zoo/animals/123",
            "/zoo/animals/123/toys/ball9",
            "/zoo/cats/animals/123/habitats/88/sections/5",
            "/archive/2023/05/17",
            "/entity/123e4567-e89b-12d3-a456-426614174000",
            "/does/not/exist",
        ];
        b.iter(|| {
            for path in test_paths.iter() {
                let res = router.find_route_by_url(path);
                black_box(&res);
            }
        })
    });
}

fn bench_reverse(c: &mut Criterion) {
    let router = Manifest::parse(example_manifest(), ManifestFormat::Toml)
        .and_then(|m| m.build_router())
        .expect("failed to build router");
    c.bench_function("reverse_url", |b| {
        b.iter(|| {
            let url = router.reverse_url(
                black_box("archive"),
                [("y", "2023"), ("m", "05"), ("d", "17")],
            );
            black_box(&url);
        })
    });
}

criterion_group!(benches, bench_compile, bench_route_match, bench_reverse);
criterion_main!(benches);
