use std::iter::Iterator;

use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::{Payload, PageInfo, PageQuery};

/// a collection query that can be walked page by page
pub trait Pageable {
    type Item;

    fn query_mut(&mut self) -> &mut PageQuery;

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Self::Item>>, RequestError>;
}

struct IterateData<I> {
    iter: std::vec::IntoIter<I>,
    page: Option<PageInfo>,
}

enum IterateState<I> {
    Empty,
    Done,
    Ready(IterateData<I>)
}

impl<I> IterateState<I> {
    fn request_chunk<P>(
        client: &ApiClient,
        pageable: &mut P
    ) -> (Option<Result<I, RequestError>>, IterateState<I>)
    where
        P: Pageable<Item = I>
    {
        let requested = pageable.query_mut().page.unwrap_or(0);

        match pageable.send(client) {
            Ok(result) => {
                let (page, payload) = result.into_tuple();

                // a server that ignores the page parameter keeps answering
                // with an earlier page
                if let Some(info) = &page {
                    if info.number < requested {
                        tracing::debug!("requested page {} but received {}", requested, info.number);

                        return (None, IterateState::Done);
                    }
                }

                let mut iter = payload.into_iter();

                let Some(item) = iter.next() else {
                    return (None, IterateState::Done);
                };

                (Some(Ok(item)), IterateState::Ready(IterateData {
                    iter,
                    page,
                }))
            },
            Err(err) => (Some(Err(err)), IterateState::Done),
        }
    }

    fn next_state<P>(
        self,
        client: &ApiClient,
        pageable: &mut P
    ) -> (Option<Result<I, RequestError>>, IterateState<I>)
    where
        P: Pageable<Item = I>
    {
        match self {
            IterateState::Done => (None, IterateState::Done),
            IterateState::Empty => Self::request_chunk(client, pageable),
            IterateState::Ready(mut data) => match data.iter.next() {
                Some(value) => (Some(Ok(value)), IterateState::Ready(data)),
                None => {
                    // without a page block there is nothing to continue with
                    let Some(page) = data.page else {
                        return (None, IterateState::Done);
                    };

                    if page.is_last() {
                        return (None, IterateState::Done);
                    }

                    let query = pageable.query_mut();
                    query.page = Some(page.number.saturating_add(1));

                    if query.size.is_none() {
                        query.size = Some(page.size);
                    }

                    Self::request_chunk(client, pageable)
                }
            }
        }
    }
}

/// iterates every item of a collection, requesting pages as needed
pub struct Iterate<'a, 'b, P>
where
    P: Pageable
{
    client: &'a ApiClient,
    pageable: &'b mut P,
    state: IterateState<P::Item>,
}

impl<'a, 'b, P> Iterate<'a, 'b, P>
where
    P: Pageable
{
    pub fn new(client: &'a ApiClient, pageable: &'b mut P) -> Self {
        Iterate {
            client,
            pageable,
            state: IterateState::Empty
        }
    }
}

impl<'a, 'b, P> Iterator for Iterate<'a, 'b, P>
where
    P: Pageable
{
    type Item = Result<P::Item, RequestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = std::mem::replace(&mut self.state, IterateState::Done);
        let (item, state) = curr.next_state(
            self.client,
            self.pageable
        );

        self.state = state;

        item
    }
}
