//! Writes a demo product list for trying out the calculator by hand.
//!
//! Costs alternate between comma and period decimals, and one product has a
//! non-numeric cost so the `N/A` path is visible too.

use anyhow::{Context, Result};

const PRODUCTS: &[(&str, &str, f64)] = &[
    ("Caneta esferográfica", "Papelaria", 2.5),
    ("Caderno 96 folhas", "Papelaria", 10.0),
    ("Lápis HB", "Papelaria", 0.9),
    ("Mochila escolar", "Acessórios", 89.9),
    ("Estojo", "Acessórios", 24.35),
    ("Calculadora científica", "Eletrônicos", 64.0),
    ("Pen drive 32GB", "Eletrônicos", 31.7),
    ("Grampeador", "Escritório", 18.45),
    ("Resma A4", "Escritório", 27.99),
    ("Marca-texto", "Papelaria", 3.2),
];

/// Small deterministic PRNG (xorshift64*) so the sample is reproducible.
struct SimpleRng(u64);

impl SimpleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "amostra_produtos.csv".to_string());

    let mut rng = SimpleRng(0x9E37_79B9_7F4A_7C15);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(["nome", "Custo", "categoria", "estoque"])?;

    for (i, &(name, category, base_cost)) in PRODUCTS.iter().enumerate() {
        // +-10% around the base cost
        let cost = base_cost * rng.range(0.9, 1.1);
        let cost = format!("{cost:.2}");
        let cost = if i % 2 == 0 { cost.replace('.', ",") } else { cost };
        let stock = (rng.range(0.0, 500.0) as u32).to_string();
        writer.write_record([name, cost.as_str(), category, stock.as_str()])?;
    }
    writer.write_record(["Kit surpresa", "a definir", "Promoções", "0"])?;

    writer.flush().context("flushing CSV")?;
    println!("Wrote {} products to {output_path}", PRODUCTS.len() + 1);
    Ok(())
}
