// @generated by lexicon from the `Texts` localisation family. Do not edit.
// Artifact: app.i18n.Texts

#[allow(dead_code, missing_docs, non_camel_case_types, non_snake_case, clippy::all, clippy::pedantic)]
pub mod app {
    pub mod i18n {
        /// Translations of the `Texts` family.
        pub trait TextsView: Send + Sync {
            /// Locale tag of this realisation.
            fn locale(&self) -> &'static str;

            fn hello(&self) -> &'static str;
            fn apples(&self) -> &'static str;
            fn type_(&self) -> &'static str;

            /// Every plural variant of `key`, in source order, when it has any.
            fn variants(&self, key: &str) -> Option<&'static [(&'static str, &'static str)]>;
        }

        /// `en` translations.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct DefaultTexts;

        impl TextsView for DefaultTexts {
            fn locale(&self) -> &'static str { "en" }
            fn hello(&self) -> &'static str { "Hello \"world\"" }
            fn apples(&self) -> &'static str { "{0} apples" }
            fn type_(&self) -> &'static str { "Kind" }
            fn variants(&self, key: &str) -> Option<&'static [(&'static str, &'static str)]> {
                match key {
                    "apples" => Some(&[("one", "{0} apple"), ("other", "{0} apples")]),
                    _ => None,
                }
            }
        }

        /// `fr` translations.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct FrTexts;

        impl TextsView for FrTexts {
            fn locale(&self) -> &'static str { "fr" }
            fn hello(&self) -> &'static str { "Bonjour" }
            fn apples(&self) -> &'static str { "{0} pommes" }
            fn type_(&self) -> &'static str { "" }
            fn variants(&self, key: &str) -> Option<&'static [(&'static str, &'static str)]> {
                match key {
                    "apples" => Some(&[("one", "{0} pomme"), ("other", "{0} pommes")]),
                    _ => None,
                }
            }
        }

        /// The available realisations; `Default` comes first.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum TextsLocale {
            Default,
            Fr,
        }

        impl TextsLocale {
            /// Every realisation in presentation order.
            pub const ALL: [Self; 2] = [Self::Default, Self::Fr];

            /// Locale tag of the realisation.
            pub const fn tag(self) -> &'static str {
                match self {
                    Self::Default => "en",
                    Self::Fr => "fr",
                }
            }

            /// Translations of the realisation.
            pub fn view(self) -> &'static dyn TextsView {
                match self {
                    Self::Default => &DefaultTexts,
                    Self::Fr => &FrTexts,
                }
            }
        }

        /// Property reported to observers after the selection changes.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum TextsChange {
            /// The selected realisation changed.
            CurrentOption,
            /// The active translations changed.
            CurrentTexts,
        }

        /// Holds the selected realisation and notifies observers on change.
        pub struct CurrentTexts {
            option: TextsLocale,
            observers: Vec<Box<dyn FnMut(TextsChange) + Send>>,
        }

        impl CurrentTexts {
            /// Starts with the default realisation selected.
            pub fn new() -> Self {
                Self { option: TextsLocale::ALL[0], observers: Vec::new() }
            }

            /// The selected realisation.
            pub fn current_option(&self) -> TextsLocale {
                self.option
            }

            /// Translations of the selected realisation.
            pub fn current(&self) -> &'static dyn TextsView {
                self.option.view()
            }

            /// Every realisation that can be selected.
            pub fn available_options(&self) -> &'static [TextsLocale] {
                &TextsLocale::ALL
            }

            /// Selects `option`; returns whether the selection changed.
            pub fn set_current_option(&mut self, option: TextsLocale) -> bool {
                if self.option == option {
                    return false;
                }
                self.option = option;
                self.notify(TextsChange::CurrentOption);
                self.notify(TextsChange::CurrentTexts);
                true
            }

            /// Registers `observer` for change notifications.
            pub fn subscribe<F>(&mut self, observer: F)
            where
                F: FnMut(TextsChange) + Send + 'static,
            {
                self.observers.push(Box::new(observer));
            }

            fn notify(&mut self, change: TextsChange) {
                for observer in &mut self.observers {
                    observer(change);
                }
            }
        }

        impl Default for CurrentTexts {
            fn default() -> Self {
                Self::new()
            }
        }
    }
}
