use anyhow::Result;
use datahelp_application::ReportSessionUseCase;
use datahelp_core::i18n::MessageKey;
use datahelp_core::preference::Language;

pub async fn get(usecase: &ReportSessionUseCase) {
    let current = usecase.language().await;
    println!("🗣️  Current language: {}", current);
    println!("Supported:");
    for language in Language::supported() {
        let marker = if language.code() == current { "*" } else { " " };
        println!("  {} {}  {}", marker, language.code(), language.display_name());
    }
}

pub async fn set(usecase: &ReportSessionUseCase, code: &str) -> Result<()> {
    match usecase.set_language(code).await {
        Ok(language) => {
            println!("✅ {} ({})", usecase.translate(MessageKey::SettingsSaved).await, language.display_name());
            Ok(())
        }
        Err(e) => {
            if let Some(message) = usecase.snapshot().await.error().message() {
                eprintln!("❌ {}", message);
            }
            Err(e.into())
        }
    }
}
