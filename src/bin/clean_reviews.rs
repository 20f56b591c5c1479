use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    review_cleaner::app::run_clean_reviews(std::env::args().skip(1))
}
