use askprops::{validator, Properties};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let temp_dir = tempfile::tempdir()?;
    let config_path = temp_dir.path().join("config.properties");

    // Register the properties and reconcile them against the file.
    // The file starts out empty, so the required token is prompted for.
    let mut properties = Properties::builder("askprops-demo")
        .config_file_path(&config_path)
        .property("token", true, |p| {
            p.prompt_message("Enter the API token")
                .validator(validator::not_empty());
        })?
        .property("workspace", false, |p| {
            p.validator(validator::is_directory());
        })?
        .build()?;

    println!("token = {}", properties.get("token")?);
    println!("workspace = {}", properties.get_or("workspace", "<unset>")?);

    // Transactional edit: per-operation failures are inspectable, the
    // store only persists when the whole closure completes.
    let outcome = properties.edit(|current, edit| {
        println!("token before edit: {}", current.get("token")?);
        if let Err(refused) = edit.set_property("token", "")? {
            println!("refused (expected): {refused}");
        }
        edit.set_property("token", "rotated-token")?
            .expect("a non-empty token passes validation");
        Ok(())
    });
    match outcome {
        Ok(()) => println!("edit committed"),
        Err(failure) => println!("edit failed: {failure}"),
    }

    println!("token = {}", properties.get("token")?);
    println!("persisted file:\n{}", std::fs::read_to_string(&config_path)?);
    Ok(())
}
