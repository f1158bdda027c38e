/// Generate a sales CSV dataset with `num_rows` valid rows
pub fn generate_csv_dataset(num_rows: usize) -> String {
    let mut csv = String::from("USER_NAME,AGE,HEIGHT,GENDER,SALE_AMOUNT,LAST_PURCHASE_DATE\n");

    for i in 0..num_rows {
        let age = 18 + i % 60;
        let gender = if i % 2 == 0 { "M" } else { "f" };
        csv.push_str(&format!(
            "user {i},{age},{},{gender},{},2021-{:02}-{:02}T{:02}:15:30Z\n",
            150 + i % 50,
            (i % 10_000) + 1,
            i % 12 + 1,
            i % 28 + 1,
            i % 24,
        ));
    }

    csv
}
