use std::borrow::Cow;

use promptline_core::model::{Model, OpenAiModel};

pub const GPT4_1: &str = "gpt-4.1";
pub const GPT4_1_MINI: &str = "gpt-4.1-mini";
pub const GPT4_O: &str = "gpt-4o";
pub const GPT4_O_MINI: &str = "gpt-4o-mini";

pub(crate) fn map_model(model: &Model) -> Cow<'static, str> {
    match model {
        Model::Custom(custom) => Cow::Owned(custom.clone()),
        Model::OpenAi(openai_model) => match openai_model {
            OpenAiModel::Gpt41 => GPT4_1.into(),
            OpenAiModel::Gpt41Mini => GPT4_1_MINI.into(),
            OpenAiModel::Gpt4o => GPT4_O.into(),
            OpenAiModel::Gpt4oMini => GPT4_O_MINI.into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_variants_map_to_wire_names() {
        assert_eq!(map_model(&Model::OpenAi(OpenAiModel::Gpt41)), "gpt-4.1");
        assert_eq!(
            map_model(&Model::OpenAi(OpenAiModel::Gpt4oMini)),
            "gpt-4o-mini"
        );
    }

    #[test]
    fn custom_names_pass_through_verbatim() {
        assert_eq!(
            map_model(&Model::Custom("gemini-1.5-flash".into())),
            "gemini-1.5-flash"
        );
    }
}
