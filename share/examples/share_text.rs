//! Share sheet demo.
use sharekit_share::{Content, ShareAction, ShareOptions, TintColor};

#[tokio::main]
async fn main() {
    let content = Content::message("Hello from sharekit!").with_title("Greeting");
    let options = ShareOptions::new()
        .with_dialog_title("Share via")
        .with_subject("A greeting")
        .with_tint_color(TintColor::rgb(0x1e, 0x90, 0xff));

    println!("Opening share sheet...");
    let pending = match sharekit_share::share(content, options) {
        Ok(pending) => pending,
        Err(e) => {
            println!("Invalid share request: {e}");
            return;
        }
    };

    match pending.await {
        Ok(result) if result.action == ShareAction::Shared => {
            println!("Shared via {:?}", result.activity_type);
        }
        Ok(_) => println!("Share sheet dismissed."),
        Err(e) => println!("Share failed: {e}"),
    }
}
