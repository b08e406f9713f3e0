use maud::{DOCTYPE, Markup, html};

use crate::{entities::movie, models::CandidateMatch};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "Films you have ranked and reviewed." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add one to get started." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(error: Option<&str>) -> String {
    page(
        "Add Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add a movie" }
                        p class="mt-2 text-gray-600" { "Search the catalog by title." }

                        @if let Some(message) = error {
                            (error_banner(message))
                        }

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Movie title" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="title" id="title" required;
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[CandidateMatch]) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select a movie" }
                    p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }

                    @if candidates.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No matches found." }
                            a class="mt-4 inline-block text-blue-600 hover:text-blue-800" href="/add" { "Try another title" }
                        }
                    } @else {
                        ul class="mt-10 space-y-3" {
                            @for candidate in candidates {
                                li class="bg-white shadow rounded-lg p-5 hover:bg-gray-100" {
                                    a class="block" href=(select_url(candidate)) {
                                        h2 class="text-lg font-semibold text-gray-900" {
                                            (candidate.title)
                                            @if let Some(year) = candidate.release_date.get(..4) {
                                                span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                                            }
                                        }
                                        p class="mt-1 text-sm text-gray-600" { (candidate.description) }
                                    }
                                }
                            }
                        }
                    }

                    a class="mt-8 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                }
            }
        },
    )
}

pub fn edit_page(movie: &movie::Model, error: Option<&str>) -> String {
    page(
        "Edit Rating",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) " (" (movie.year) ")" }
                        p class="mt-2 text-gray-600" { "Set your rating and review." }

                        @if let Some(message) = error {
                            (error_banner(message))
                        }

                        form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="rating" { "Rating out of 10" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="rating" id="rating" value=(movie.rating) required;
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="review" { "Review" }
                                textarea class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="review" id="review" rows="4" required { (movie.review) }
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn error_banner(message: &str) -> Markup {
    html! {
        div class="mt-6 rounded-md border border-red-300 bg-red-50 px-4 py-3 text-sm text-red-700" {
            (message)
        }
    }
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-6" {
                img class="h-36 w-24 rounded object-cover bg-gray-200" src=(movie.img_url) alt=(movie.title);
                div class="flex-1" {
                    div class="flex items-start justify-between gap-4" {
                        h2 class="text-xl font-semibold text-gray-900" {
                            (movie.title)
                            span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                        }
                        div class="flex gap-3 text-sm" {
                            a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Edit" }
                            a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                        }
                    }
                    p class="mt-1 text-sm font-medium text-gray-700" { "Rating: " (movie.rating) " / 10" }
                    p class="mt-2 text-sm text-gray-600" { (movie.description) }
                    @if !movie.review.is_empty() {
                        p class="mt-3 text-sm italic text-gray-700" { "“" (movie.review) "”" }
                    }
                }
            }
        }
    }
}

fn select_url(candidate: &CandidateMatch) -> String {
    format!(
        "/select?title={}&release_date={}&description={}&poster_path={}",
        urlencoding::encode(&candidate.title),
        urlencoding::encode(&candidate.release_date),
        urlencoding::encode(&candidate.description),
        urlencoding::encode(&candidate.poster_path),
    )
}
