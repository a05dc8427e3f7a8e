use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sprig_core::{Limits, ValueArena};
use sprig_parser::{parse, parse_program};

const SIMPLE_EXPR: &str = "(+ 1 2)";
const NESTED_EXPR: &str = "(* (+ 1 2) (- 4 3))";
const DOTTED_EXPR: &str = "((a . 1) (b . 2) (c . \"three\"))";
const COMMENTED_EXPR: &str = r#"
; association list
(define table ; name
  ((alpha . 1)   ; first
   (beta . #t)   ; second
   (gamma . "g")))
"#;

const LARGE_PROGRAM: &str = r#"
(define (quicksort lst)
  (if (empty? lst)
      ()
      (let ((pivot (head lst))
            (rest (tail lst)))
        (append (quicksort (filter (lambda (x) (< x pivot)) rest))
                (cons pivot (quicksort (filter (lambda (x) (>= x pivot)) rest)))))))
(display (quicksort (3 1 4 1 5 9 2 6 5 3 5)))
"#;

fn parser_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for (name, source) in [
        ("simple_expr", SIMPLE_EXPR),
        ("nested_expr", NESTED_EXPR),
        ("dotted_pairs", DOTTED_EXPR),
        ("comments", COMMENTED_EXPR),
        ("large_program", LARGE_PROGRAM),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let _ = black_box(parse(black_box(source)));
            });
        });
    }

    group.finish();
}

fn arena_reuse_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_reuse");

    // Clearing one arena between parses instead of building a new one.
    let limits = Limits::default().with_max_nodes(1024);
    let mut arena = ValueArena::new(limits);
    group.throughput(Throughput::Bytes(LARGE_PROGRAM.len() as u64));
    group.bench_function("large_program", |b| {
        b.iter(|| {
            let roots = parse_program(&mut arena, black_box(LARGE_PROGRAM));
            let _ = black_box(roots);
            arena.clear();
        });
    });

    group.finish();
}

fn scaling_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_scaling");

    for size in [10, 100, 500].iter() {
        let input = generate_nested_expr(*size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let _ = black_box(parse(black_box(input)));
            });
        });
    }

    group.finish();
}

fn generate_nested_expr(depth: usize) -> String {
    if depth == 0 {
        "1".to_string()
    } else {
        format!("(+ {} {})", generate_nested_expr(depth - 1), depth)
    }
}

criterion_group!(benches, parser_benchmarks, arena_reuse_benchmarks, scaling_benchmarks);
criterion_main!(benches);
