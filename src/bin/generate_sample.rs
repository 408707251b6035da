/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Format an amount the way German bank exports do: comma decimal mark.
fn german_amount(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let merchants: &[(&str, f64, f64)] = &[
        ("REWE MARKT GMBH DANKE", 8.0, 90.0),
        ("EDEKA ZENTRALE AG", 5.0, 75.0),
        ("AMAZON PAYMENTS EUROPE S.C.A.", 4.0, 120.0),
        ("SPOTIFY AB STOCKHOLM", 9.99, 9.99),
        ("APPLE.COM/BILL ITUNES.COM", 0.99, 29.99),
        ("UBER *TRIP HELP.UBER.COM", 6.0, 40.0),
        ("SHELL TANKSTELLE 1044", 30.0, 95.0),
        ("MIETE WOHNUNG SCHMIDT", 820.0, 820.0),
        ("DB VERTRIEB GMBH FAHRKARTE", 9.0, 140.0),
        ("LIEFERANDO.DE BESTELLUNG", 12.0, 45.0),
        ("NETFLIX INTERNATIONAL B.V.", 12.99, 12.99),
        ("STADTWERKE ABSCHLAG STROM", 65.0, 65.0),
    ];

    let n_rows = 120;
    let output_path = "sample_transactions.csv";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    writer
        .write_record(["Buchungstag", "Beschreibung", "Betrag"])
        .expect("Failed to write header");

    for i in 0..n_rows {
        let day = 1 + i % 28;
        let month = 1 + (i / 28) % 12;
        let date = format!("{day:02}.{month:02}.2024");

        let &(merchant, min, max) = rng.pick(merchants);
        let amount = german_amount(-(min + (max - min) * rng.next_f64()));

        writer
            .write_record([date.as_str(), merchant, amount.as_str()])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush");
    println!("Wrote {n_rows} transactions to {output_path}");
}
