use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabprep::{build_preprocessor, ColumnGroups, FittedTransformer, RawTable, Transformer};

const GENDERS: [&str; 2] = ["female", "male"];
const GROUPS: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
const EDUCATION: [&str; 4] = ["high school", "some college", "bachelor's degree", ""];

/// Synthetic student table with a sprinkle of missing cells.
fn student_table(n: usize) -> RawTable {
    let headers = [
        "gender",
        "race_ethnicity",
        "parental_level_of_education",
        "lunch",
        "test_preparation_course",
        "reading_score",
        "writing_score",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let rows = (0..n)
        .map(|i| {
            vec![
                GENDERS[i % 2].to_string(),
                GROUPS[i % 5].to_string(),
                EDUCATION[i % 4].to_string(),
                if i % 3 == 0 { "free/reduced" } else { "standard" }.to_string(),
                if i % 7 == 0 { "completed" } else { "none" }.to_string(),
                if i % 11 == 0 {
                    "NA".to_string()
                } else {
                    (20 + (i * 53) % 80).to_string()
                },
                (15 + (i * 29) % 85).to_string(),
            ]
        })
        .collect();

    RawTable::new(headers, rows).expect("valid synthetic table")
}

fn bench_fit_transform(c: &mut Criterion) {
    let columns = ColumnGroups::default();

    for n_rows in [100, 1000, 10000].iter() {
        let table = student_table(*n_rows);
        c.bench_with_input(BenchmarkId::new("fit_transform", n_rows), &table, |b, table| {
            b.iter(|| {
                let out = build_preprocessor(&columns)
                    .fit_transform(black_box(table))
                    .expect("fit_transform");
                black_box(out);
            });
        });
    }
}

fn bench_transform(c: &mut Criterion) {
    let columns = ColumnGroups::default();
    let fitted = build_preprocessor(&columns)
        .fit(&student_table(1000))
        .expect("fit");

    for n_rows in [100, 1000, 10000].iter() {
        let table = student_table(*n_rows);
        c.bench_with_input(BenchmarkId::new("transform", n_rows), &table, |b, table| {
            b.iter(|| black_box(fitted.transform(black_box(table)).expect("transform")));
        });
    }
}

criterion_group!(benches, bench_fit_transform, bench_transform);
criterion_main!(benches);
