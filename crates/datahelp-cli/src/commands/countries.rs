use datahelp_core::country;

pub fn run() {
    println!("🌍 Available countries:");
    for country in country::catalog() {
        println!("  {}  {}", country.code, country.name);
    }
}
