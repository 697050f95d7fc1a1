//! Regions command - list known region codes.

use lifex::Region;

pub fn run(all: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let regions = select(all);

    if json {
        println!("{}", serde_json::to_string_pretty(&regions)?);
    } else {
        for region in &regions {
            println!("{}", region);
        }
    }

    Ok(())
}

fn select(all: bool) -> Vec<Region> {
    if all {
        Region::ALL.to_vec()
    } else {
        Region::list_countries()
    }
}
