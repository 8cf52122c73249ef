use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feature_prep::{
    FeaturePreprocessor, PreprocessConfig, LABEL_ENCODED_COLUMNS, ONE_HOT_COLUMNS,
    SENTINEL_ZERO_COLUMNS,
};
use order_table::{Column, Table, Value};

fn cycle(i: usize, options: &[&str]) -> Value {
    Value::from(options[i % options.len()])
}

fn synthetic_orders(rows: usize) -> Table {
    let mut columns = vec![Column::new(
        "AMOUNT",
        (0..rows).map(|i| Value::Int((i * 37 % 500) as i64)).collect(),
    )];
    for (c, name) in ONE_HOT_COLUMNS.iter().enumerate() {
        columns.push(Column::new(
            *name,
            (0..rows).map(|i| cycle(i + c, &["a", "b", "c", "d", "?"])).collect(),
        ));
    }
    for name in LABEL_ENCODED_COLUMNS {
        columns.push(Column::new(
            name,
            (0..rows).map(|i| cycle(i, &["ja", "nein", "?"])).collect(),
        ));
    }
    columns.push(Column::new(
        "TIME_ORDER",
        (0..rows).map(|i| cycle(i, &["09:15", "13:00", "?", "23:59"])).collect(),
    ));
    columns.push(Column::new(
        "B_BIRTHDATE",
        (0..rows).map(|i| cycle(i, &["1970-01-01", "1985-07-14", "?"])).collect(),
    ));
    for name in SENTINEL_ZERO_COLUMNS {
        let options: &[&str] = if name == "DATE_LORDER" {
            &["2020-01-01", "?", "2021-03-04 10:00:00"]
        } else {
            &["?", "1", "2"]
        };
        columns.push(Column::new(name, (0..rows).map(|i| cycle(i, options)).collect()));
    }
    columns.push(Column::new(
        "CLASS",
        (0..rows).map(|i| Value::Int((i % 2) as i64)).collect(),
    ));
    Table::from_columns(columns).expect("synthetic table")
}

fn bench_preprocess(c: &mut Criterion) {
    let prep = FeaturePreprocessor::new(PreprocessConfig::default());
    let mut group = c.benchmark_group("preprocess");
    for rows in [100, 1_000, 10_000] {
        let table = synthetic_orders(rows);
        group.bench_with_input(BenchmarkId::new("fit_transform", rows), &table, |b, t| {
            b.iter(|| prep.preprocess(black_box(t), true).expect("preprocess"))
        });

        let vocab = prep.fit(&table).expect("fit");
        group.bench_with_input(BenchmarkId::new("transform", rows), &table, |b, t| {
            b.iter(|| prep.transform(black_box(t), false, &vocab).expect("transform"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
